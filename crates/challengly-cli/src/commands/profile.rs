use clap::Subcommand;
use challengly_core::profile::{INTERESTS, MOTIVATIONS};
use challengly_core::{Difficulty, Profile, SqliteStore};
use serde_json::json;

use super::{print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Update the profile
    Set {
        /// Comma-separated interest ids
        #[arg(long, value_delimiter = ',')]
        interests: Option<Vec<String>>,
        /// Comma-separated motivation ids
        #[arg(long, value_delimiter = ',')]
        motivations: Option<Vec<String>>,
        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Skip onboarding and store the default profile
    Skip,
    /// List the valid interest and motivation ids
    Options,
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut store = SqliteStore::open()?;

    match action {
        ProfileAction::Show => {
            let onboarded = Profile::exists(&store)?;
            let profile = Profile::load(&store)?;
            print_json(&json!({ "onboarded": onboarded, "profile": profile }))?;
        }
        ProfileAction::Set {
            interests,
            motivations,
            difficulty,
        } => {
            let mut profile = Profile::load(&store)?;
            if let Some(ids) = interests {
                profile.set_interests(ids)?;
            }
            if let Some(ids) = motivations {
                profile.set_motivations(ids)?;
            }
            if let Some(difficulty) = difficulty {
                profile.difficulty = difficulty;
            }
            profile.save(&mut store)?;
            print_json(&profile)?;
        }
        ProfileAction::Skip => {
            let profile = Profile::skipped();
            profile.save(&mut store)?;
            print_json(&profile)?;
        }
        ProfileAction::Options => {
            print_json(&json!({ "interests": INTERESTS, "motivations": MOTIVATIONS }))?;
        }
    }
    Ok(())
}
