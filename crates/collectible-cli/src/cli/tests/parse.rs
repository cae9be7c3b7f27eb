//! Tests for download, tally, catalog, completions, man.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parse_download() {
    match parse(&["collectible", "download", "http://example.com/item"]) {
        CliCommand::Download { url } => assert_eq!(url, "http://example.com/item"),
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_accepts_any_text() {
    match parse(&["collectible", "download", "not a url"]) {
        CliCommand::Download { url } => assert_eq!(url, "not a url"),
        _ => panic!("expected Download"),
    }
    match parse(&["collectible", "download", ""]) {
        CliCommand::Download { url } => assert_eq!(url, ""),
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_parse_download_requires_url() {
    assert!(Cli::try_parse_from(["collectible", "download"]).is_err());
}

#[test]
fn cli_parse_tally() {
    match parse(&["collectible", "tally", "maps/1-A.json"]) {
        CliCommand::Tally { maps, catalog } => {
            assert_eq!(maps, vec![PathBuf::from("maps/1-A.json")]);
            assert!(catalog.is_none());
        }
        _ => panic!("expected Tally"),
    }
}

#[test]
fn cli_parse_tally_with_catalog() {
    match parse(&[
        "collectible",
        "tally",
        "maps/1-A.json",
        "--catalog",
        "catalog.json",
    ]) {
        CliCommand::Tally { maps, catalog } => {
            assert_eq!(maps, vec![PathBuf::from("maps/1-A.json")]);
            assert_eq!(catalog, Some(PathBuf::from("catalog.json")));
        }
        _ => panic!("expected Tally with --catalog"),
    }
}

#[test]
fn cli_parse_tally_several_maps() {
    match parse(&["collectible", "tally", "maps/1-A.json", "maps/2-B.json"]) {
        CliCommand::Tally { maps, .. } => assert_eq!(
            maps,
            vec![PathBuf::from("maps/1-A.json"), PathBuf::from("maps/2-B.json")]
        ),
        _ => panic!("expected Tally"),
    }
}

#[test]
fn cli_parse_tally_requires_map() {
    assert!(Cli::try_parse_from(["collectible", "tally"]).is_err());
}

#[test]
fn cli_parse_catalog_archives_and_dirs() {
    match parse(&["collectible", "catalog", "SpikyMod.zip", "modB"]) {
        CliCommand::Catalog { mods } => {
            assert_eq!(mods, vec![PathBuf::from("SpikyMod.zip"), PathBuf::from("modB")]);
        }
        _ => panic!("expected Catalog"),
    }
}

#[test]
fn cli_parse_catalog_requires_dir() {
    assert!(Cli::try_parse_from(["collectible", "catalog"]).is_err());
}

#[test]
fn cli_parse_completions() {
    match parse(&["collectible", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["collectible", "man"]), CliCommand::Man));
}
