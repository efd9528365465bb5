//! Command-line arguments.

use clap::{Parser, Subcommand};
use mlem_core::{LayoutPreset, LayoutWidgetKind};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mlem-layout")]
#[command(about = "Arrange the widgets of Mlem's post and comment interaction bars", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path (defaults to config.json in the Mlem data directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the stored arrangement
    Show {
        /// Interaction bar: post or comment
        #[arg(value_parser = parse_preset)]
        preset: LayoutPreset,
    },

    /// Drag a widget into a collection and save the result
    Move {
        /// Interaction bar: post or comment
        #[arg(value_parser = parse_preset)]
        preset: LayoutPreset,

        /// Widget kind, e.g. share or score_counter
        #[arg(value_parser = parse_widget)]
        widget: LayoutWidgetKind,

        /// Target collection: bar or tray
        collection: String,
    },

    /// Delete the stored arrangement
    Reset {
        /// Interaction bar: post or comment
        #[arg(value_parser = parse_preset)]
        preset: LayoutPreset,
    },
}

fn parse_preset(name: &str) -> Result<LayoutPreset, String> {
    LayoutPreset::from_name(name).ok_or_else(|| format!("unknown layout '{}', expected post or comment", name))
}

fn parse_widget(name: &str) -> Result<LayoutWidgetKind, String> {
    LayoutWidgetKind::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = LayoutWidgetKind::ALL.iter().map(LayoutWidgetKind::name).collect();
        format!("unknown widget '{}', expected one of: {}", name, known.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mlem-layout").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_show() {
        let cli = parse(&["show", "post"]).unwrap();
        assert_eq!(cli.command, Command::Show { preset: LayoutPreset::PostInteractionBar });
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_parse_move() {
        let cli = parse(&["move", "comment_interaction_bar", "share", "bar", "--config", "c.json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Move {
                preset: LayoutPreset::CommentInteractionBar,
                widget: LayoutWidgetKind::Share,
                collection: "bar".to_string(),
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert_eq!(parse(&["show", "inbox"]).unwrap_err().kind(), ErrorKind::ValueValidation);

        let err = parse(&["move", "post", "boost", "bar"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("boost"));
    }

    #[test]
    fn test_help_is_available() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["show", "--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }
}
