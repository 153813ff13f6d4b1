use std::path::PathBuf;

use langdict::{IdentityMode, classify_file};
use langdict_cli::{Config, resolve_source};

/// Print every language group of the source, optionally with a distinct-term count.
pub fn run_view_command(
    config: &Config,
    source: Option<PathBuf>,
    lang_filter: Option<String>,
    identity: Option<IdentityMode>,
) {
    let source = resolve_source(source, &config.source_dir).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    // Viewing never validates language codes.
    let classify = config.classify_options().with_language_check(false);
    let mut classification = classify_file(&source, &config.read_options(), &classify)
        .unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", source.display(), e);
            std::process::exit(1);
        });

    if let Some(lang) = &lang_filter {
        classification
            .groups
            .retain(|group| group.language_code() == lang);
    }

    if classification.groups.is_empty() {
        match &lang_filter {
            Some(lang) => eprintln!("No terms found for language: {}", lang),
            None => eprintln!("No terms found"),
        }
        std::process::exit(1);
    }

    for group in &mut classification.groups {
        println!("\n=== {} ===", group.language_code());
        println!("Terms: {}", group.len());
        print!("{}", group.dump("\n", true));

        if let Some(mode) = identity {
            group.set_identity_mode(mode);
            println!(
                "Distinct terms ({}): {}",
                mode,
                group.distinct_terms().len()
            );
        }
    }
}
