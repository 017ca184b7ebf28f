//! Small command-line front end: rewrite a template file's `##key##`
//! placeholders using one language's translation file.
//!
//! ```bash
//! tpl-i18n --locales-dir locales --language de page.tpl
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use tpl_i18n::{load_translation_file, rewrite, translation_file_path, validate_language_code};

#[derive(Parser)]
#[command(name = "tpl-i18n", about = "Rewrite ##key## placeholders using a translation file")]
struct Args {
    /// Directory holding <language>.txt translation files
    #[arg(long, default_value = "locales")]
    locales_dir: PathBuf,

    /// Language code selecting the translation file
    #[arg(short, long)]
    language: String,

    /// Template file to rewrite
    template: PathBuf,
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    validate_language_code(&args.language)?;

    let path = translation_file_path(&args.locales_dir, &args.language);
    let table = load_translation_file(&path)?;

    let source = std::fs::read_to_string(&args.template)
        .map_err(|e| format!("{}: {}", args.template.display(), e))?;

    Ok(rewrite(&source, &table))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "tpl-i18n",
            "--locales-dir",
            "i18n",
            "--language",
            "de",
            "page.tpl",
        ])
        .unwrap();
        assert_eq!(args.locales_dir, PathBuf::from("i18n"));
        assert_eq!(args.language, "de");
        assert_eq!(args.template, PathBuf::from("page.tpl"));
    }

    #[test]
    fn test_args_default_locales_dir() {
        let args = Args::try_parse_from(["tpl-i18n", "-l", "en", "page.tpl"]).unwrap();
        assert_eq!(args.locales_dir, PathBuf::from("locales"));
    }
}
