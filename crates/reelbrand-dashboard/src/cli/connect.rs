/*
[INPUT]:  Platform schema and user input via CLI prompts
[OUTPUT]: Connected account via POST /accounts/{platform}
[POS]:    CLI onboarding flow
[UPDATE]: When FieldKind variants or the onboarding flow change
*/

use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use tracing::debug;

use reelbrand_adapter::Platform;
use reelbrand_dashboard::form::{FieldValue, FormState};
use reelbrand_dashboard::notify::Notification;
use reelbrand_dashboard::{DashboardConfig, FieldDefinition, FieldKind, OnboardingSession, Platforms};

use super::platforms::print_guide;

pub async fn run_connect(
    config: &DashboardConfig,
    platforms: Platforms,
    platform: Option<&str>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let client = config.build_client()?;
    let tester = config.connection_tester();
    let mut session = OnboardingSession::new(platforms, config.require_connection_test);

    println!("{}", style("Connect a social account").bold().cyan());

    match platform {
        Some(name) => {
            let platform =
                Platform::from_name(name).ok_or_else(|| anyhow!("unknown platform '{name}'"))?;
            if !session.select_platform(platform) {
                return Err(anyhow!("platform '{name}' is not configured"));
            }
        }
        None => choose_platform(&mut session, &theme)?,
    }

    prompt_all_fields(&mut session, &theme)?;

    loop {
        let save_label = if session.can_save() {
            "Save account".to_string()
        } else {
            format!("Save account ({})", style("test connection first").dim())
        };
        let actions = vec![
            "Test connection".to_string(),
            save_label,
            "Edit a field".to_string(),
            "Switch platform".to_string(),
            "Show setup guide".to_string(),
            "Cancel".to_string(),
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt(format!(
                "{} [{}]",
                session.platform().name,
                session.status().label()
            ))
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => {
                println!("{}", style("Testing connection...").dim());
                session.test_connection(&tester).await;
            }
            1 => {
                let saved = session.save(&client).await;
                print_notifications(session.take_notifications());
                match saved {
                    Ok(response) => {
                        debug!(%response, "account created");
                        return Ok(());
                    }
                    Err(err) => debug!(error = %err, "save refused"),
                }
            }
            2 => edit_one_field(&mut session, &theme)?,
            3 => {
                choose_platform(&mut session, &theme)?;
                prompt_all_fields(&mut session, &theme)?;
            }
            4 => print_guide(session.platform()),
            _ => {
                println!("{}", style("Cancelled.").yellow());
                return Ok(());
            }
        }
        print_notifications(session.take_notifications());
    }
}

fn choose_platform(session: &mut OnboardingSession, theme: &ColorfulTheme) -> Result<()> {
    let items: Vec<String> = session
        .platforms()
        .iter()
        .map(|def| format!("{} - {}", def.name, def.description))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("Platform")
        .items(&items)
        .default(session.selected_index())
        .interact()?;
    if let Some(platform) = session.platforms().at(index).map(|def| def.platform) {
        session.select_platform(platform);
    }
    Ok(())
}

fn prompt_all_fields(session: &mut OnboardingSession, theme: &ColorfulTheme) -> Result<()> {
    println!(
        "\n{}",
        style(format!("--- {} ---", session.platform().name)).bold()
    );
    let fields = session.platform().fields.clone();
    for field in &fields {
        prompt_into_session(field, session, theme)?;
    }
    Ok(())
}

fn edit_one_field(session: &mut OnboardingSession, theme: &ColorfulTheme) -> Result<()> {
    let rendered: Vec<String> = session
        .rendered()
        .iter()
        .map(|field| format!("{} = {}", field.label(), field.display))
        .collect();
    let index = Select::with_theme(theme)
        .with_prompt("Field")
        .items(&rendered)
        .default(0)
        .interact()?;
    if let Some(field) = session.platform().fields.get(index).cloned() {
        prompt_into_session(&field, session, theme)?;
    }
    Ok(())
}

fn prompt_into_session(
    field: &FieldDefinition,
    session: &mut OnboardingSession,
    theme: &ColorfulTheme,
) -> Result<()> {
    if let Some(value) = prompt_field(field, session.form(), theme)? {
        session.set_value(&field.id, value);
    }
    Ok(())
}

fn prompt_label(field: &FieldDefinition) -> String {
    let mut label = field.label.clone();
    if field.required {
        label.push_str(" *");
    }
    if let Some(placeholder) = &field.placeholder {
        label.push_str(&format!(" ({placeholder})"));
    }
    label
}

/// One prompt per field, chosen by kind. Empty answers leave an unset field unset.
fn prompt_field(
    field: &FieldDefinition,
    form: &FormState,
    theme: &ColorfulTheme,
) -> Result<Option<FieldValue>> {
    if field.read_only {
        return Ok(None);
    }
    if let Some(help) = &field.help {
        println!("  {}", style(help).dim());
    }
    let label = prompt_label(field);

    let value = match field.kind {
        FieldKind::Toggle => {
            let checked = Confirm::with_theme(theme)
                .with_prompt(label)
                .default(form.flag(&field.id).unwrap_or(false))
                .interact()?;
            Some(FieldValue::Flag(checked))
        }
        FieldKind::Dropdown => {
            let labels: Vec<&str> = field.options.iter().map(|opt| opt.label.as_str()).collect();
            let index = Select::with_theme(theme)
                .with_prompt(label)
                .items(&labels)
                .default(field.option_index(form.text(&field.id)))
                .interact()?;
            field
                .options
                .get(index)
                .map(|option| FieldValue::Text(option.value.clone()))
        }
        FieldKind::Password => {
            let secret = Password::with_theme(theme)
                .with_prompt(label)
                .allow_empty_password(true)
                .interact()?;
            (!secret.is_empty()).then_some(FieldValue::Text(secret))
        }
        FieldKind::Date => {
            let answer: String = Input::with_theme(theme)
                .with_prompt(format!("{label} [YYYY-MM-DD]"))
                .with_initial_text(form.text(&field.id).unwrap_or_default())
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), String> {
                    if input.trim().is_empty()
                        || NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").is_ok()
                    {
                        Ok(())
                    } else {
                        Err("expected a date like 2026-12-31".to_string())
                    }
                })
                .interact_text()?;
            text_answer(form, &field.id, answer)
        }
        FieldKind::Email => {
            let answer: String = Input::with_theme(theme)
                .with_prompt(label)
                .with_initial_text(form.text(&field.id).unwrap_or_default())
                .allow_empty(true)
                .validate_with(|input: &String| -> Result<(), String> {
                    if input.trim().is_empty() || input.contains('@') {
                        Ok(())
                    } else {
                        Err("expected an email address".to_string())
                    }
                })
                .interact_text()?;
            text_answer(form, &field.id, answer)
        }
        FieldKind::Text | FieldKind::Textarea | FieldKind::Multitag | FieldKind::Unrecognized => {
            let answer: String = Input::with_theme(theme)
                .with_prompt(label)
                .with_initial_text(form.text(&field.id).unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            text_answer(form, &field.id, answer)
        }
    };
    Ok(value)
}

fn text_answer(form: &FormState, id: &str, answer: String) -> Option<FieldValue> {
    if answer.is_empty() && !form.is_set(id) {
        return None;
    }
    Some(FieldValue::Text(answer))
}

pub fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let title = if notification.is_destructive() {
            style(notification.title).red().bold()
        } else {
            style(notification.title).green().bold()
        };
        println!("{title}: {}", notification.description);
    }
}
