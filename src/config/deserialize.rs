// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Handles stage names, image refs, and command lines.

use serde::Deserialize;

use crate::types::{ImageRef, StageName};

pub fn deserialize_stage_name<'de, D>(deserializer: D) -> Result<StageName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    StageName::new(&s).map_err(serde::de::Error::custom)
}

pub fn deserialize_image_ref_option<'de, D>(deserializer: D) -> Result<Option<ImageRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| ImageRef::parse(&s).map_err(serde::de::Error::custom))
        .transpose()
}

/// A command is either an argument list or a single string run through `sh -c`.
pub fn deserialize_command<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(CommandEntry::deserialize(deserializer)?.into_args())
}

pub fn deserialize_commands<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries: Vec<CommandEntry> = Vec::deserialize(deserializer)?;
    Ok(entries.into_iter().map(CommandEntry::into_args).collect())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandEntry {
    Shell(String),
    Args(Vec<String>),
}

impl CommandEntry {
    fn into_args(self) -> Vec<String> {
        match self {
            CommandEntry::Shell(line) => vec!["sh".to_string(), "-c".to_string(), line],
            CommandEntry::Args(args) => args,
        }
    }
}
