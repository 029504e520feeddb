/*
[INPUT]:  Loaded platform schemas and configuration
[OUTPUT]: Human-readable schema, guide, and config summaries on stdout
[POS]:    CLI reporting
[UPDATE]: When PlatformDefinition or DashboardConfig gain user-visible parts
*/

use anyhow::{Result, anyhow};
use console::style;

use reelbrand_adapter::Platform;
use reelbrand_dashboard::schema::REDIRECT_URI;
use reelbrand_dashboard::{DashboardConfig, FieldKind, PlatformDefinition, Platforms};

pub fn print_platforms(platforms: &Platforms, only: Option<&str>) -> Result<()> {
    let filter = match only {
        Some(name) => {
            Some(Platform::from_name(name).ok_or_else(|| anyhow!("unknown platform '{name}'"))?)
        }
        None => None,
    };

    for def in platforms
        .iter()
        .filter(|def| filter.is_none_or(|platform| def.platform == platform))
    {
        println!("{}", style(&def.name).bold().cyan());
        println!("  {}", def.description);
        for field in &def.fields {
            let required = if field.required { " *" } else { "" };
            println!(
                "  - {}{} [{}] ({})",
                field.label,
                required,
                kind_name(field.kind),
                style(&field.id).dim()
            );
            if !field.options.is_empty() {
                let values: Vec<&str> = field.options.iter().map(|opt| opt.value.as_str()).collect();
                println!("      options: {}", values.join(", "));
            }
            if let Some(help) = &field.help {
                println!("      {}", style(help).dim());
            }
        }
        print_guide(def);
        println!();
    }
    Ok(())
}

pub fn print_guide(def: &PlatformDefinition) {
    let guide = &def.guide;
    println!("\n  {}", style(&guide.title).bold());
    for (index, step) in guide.steps.iter().enumerate() {
        println!("  {}. {step}", index + 1);
    }
    if !guide.urls.is_empty() {
        println!("  {}", style("Links").underlined());
        for link in &guide.urls {
            println!("    {}: {}", link.label, link.url);
        }
    }
    for note in &guide.notes {
        println!("  {} {note}", style("!").yellow());
    }
    println!("  Redirect URI: {}", style(REDIRECT_URI).green());
}

pub fn print_config_summary(config: &DashboardConfig, platforms: &Platforms) {
    println!("{}", style("Configuration OK").bold().green());
    println!("  api_url: {}", config.api_url);
    println!(
        "  timeouts: request {}s, connect {}s",
        config.request_timeout_secs, config.connect_timeout_secs
    );
    println!(
        "  connection test: {}ms delay, success ratio {}",
        config.connection_test.delay_ms, config.connection_test.success_ratio
    );
    println!("  require connection test: {}", config.require_connection_test);
    match &config.schema_path {
        Some(path) => println!("  schema: {}", path.display()),
        None => println!("  schema: built-in"),
    }
    let names: Vec<&str> = platforms.iter().map(|def| def.name.as_str()).collect();
    println!("  platforms: {}", names.join(", "));
}

fn kind_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::Password => "password",
        FieldKind::Date => "date",
        FieldKind::Email => "email",
        FieldKind::Textarea => "textarea",
        FieldKind::Dropdown => "dropdown",
        FieldKind::Multitag => "multitag",
        FieldKind::Toggle => "toggle",
        FieldKind::Unrecognized => "text*",
    }
}
