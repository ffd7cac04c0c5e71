//! List rules command implementation.

use jdoc_lint_core::NodeKind;
use jdoc_lint_rules::{all_checks, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available checks:\n");
    println!(
        "{:<8} {:<32} {:<10} Description",
        "Code", "Name", "Capability"
    );
    println!("{}", "-".repeat(96));

    for check in all_checks() {
        let descriptor = check.descriptor();
        println!(
            "{:<8} {:<32} {:<10} {}",
            check.code(),
            check.name(),
            descriptor.capability(),
            check.description()
        );
        println!("{:<52} default kinds: {}", "", descriptor.default_kinds());
    }

    println!("\nPresets:");
    for (label, preset) in [
        ("recommended", Preset::Recommended),
        ("strict", Preset::Strict),
        ("minimal", Preset::Minimal),
    ] {
        println!("  {:<12} - {}", label, preset.names().join(", "));
    }

    println!("\nUse --rules to filter specific checks, e.g.:");
    println!("  jdoc-lint check --rules prefer-inline-tags,atclause-order");
    println!("  jdoc-lint check --rules JD001,JD003");
}

/// Prints every node kind name accepted by `javadoc_tokens`.
pub fn run_kinds() {
    for kind in NodeKind::ALL {
        println!("{}", kind.name());
    }
}
