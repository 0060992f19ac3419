//! Command-line arguments for the board CLI.

use clap::{Args, Parser, Subcommand};
use knowboard_core::db::DEFAULT_DB_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "knowboard",
    version,
    about = "Knowledge board - organize topics and subtopics as markdown cards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite file holding the board.
    #[arg(
        long = "db",
        value_name = "PATH",
        default_value = DEFAULT_DB_FILE,
        global = true
    )]
    pub db: PathBuf,

    /// Storage slot inside the database.
    #[arg(long = "storage-key", value_name = "KEY", global = true)]
    pub storage_key: Option<String>,

    /// Absolute directory for rolling log files; logging is off when absent.
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error (defaults by build mode).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List topics, optionally filtered by title, tag or subtopic title.
    List {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one topic with its subtopics.
    Show { topic_id: String },
    /// Append a placeholder topic.
    AddTopic,
    /// Edit topic fields; omitted fields keep their value.
    EditTopic(EditTopicArgs),
    /// Delete a topic and all of its subtopics.
    DeleteTopic { topic_id: String },
    /// Append a placeholder subtopic to a topic.
    AddSubtopic { topic_id: String },
    /// Edit subtopic fields; omitted fields keep their value.
    EditSubtopic(EditSubtopicArgs),
    /// Delete one subtopic.
    DeleteSubtopic {
        topic_id: String,
        subtopic_id: String,
    },
    /// Write the board as pretty JSON.
    Export {
        /// Directory receiving `knowledge-board.json`.
        #[arg(long, value_name = "DIR", default_value = ".")]
        out: PathBuf,
    },
    /// Replace the board with the topics of a JSON file.
    Import { file: PathBuf },
    /// Print the core version.
    Version,
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::AddTopic => "add-topic",
            Self::EditTopic(_) => "edit-topic",
            Self::DeleteTopic { .. } => "delete-topic",
            Self::AddSubtopic { .. } => "add-subtopic",
            Self::EditSubtopic(_) => "edit-subtopic",
            Self::DeleteSubtopic { .. } => "delete-subtopic",
            Self::Export { .. } => "export",
            Self::Import { .. } => "import",
            Self::Version => "version",
        }
    }
}

#[derive(Args)]
pub struct EditTopicArgs {
    pub topic_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
    /// Comma-separated tags.
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args)]
pub struct EditSubtopicArgs {
    pub topic_id: String,
    pub subtopic_id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{Cli, DEFAULT_DB_FILE};
    use clap::Parser;

    #[test]
    fn command_name_matches_typed_subcommand() {
        for name in ["list", "add-topic", "version"] {
            let cli = Cli::try_parse_from(["knowboard", name]).unwrap();
            assert_eq!(cli.command.name(), name);
        }

        let cli =
            Cli::try_parse_from(["knowboard", "delete-subtopic", "topic-aws", "subtopic-aws-ec2"])
                .unwrap();
        assert_eq!(cli.command.name(), "delete-subtopic");
        assert_eq!(cli.db, std::path::PathBuf::from(DEFAULT_DB_FILE));
    }
}
