use anyhow::{Context, Result};
use serde::Serialize;

use lectern::app::App;
use lectern::guard::GuardDecision;
use lectern::routes::Route;
use lectern::store::LocalStore;
use lectern::views::ViewState;

use crate::cli_runtime::Globals;
use crate::{AdminCommands, Commands, ConfigCommands, InstructorCommands, ProfileCommands};

mod admin;
mod authoring;
mod catalog;
mod session;

pub(crate) fn handle_command(globals: &Globals, command: Commands) -> Result<()> {
    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Show(args) => session::handle_config_show(globals, args.json)?,
            ConfigCommands::Set { url, timeout_secs } => {
                session::handle_config_set(globals, url, timeout_secs)?
            }
        },
        Commands::Login(args) => session::handle_login_command(globals, args)?,
        Commands::Register(args) => session::handle_register_command(globals, args)?,
        Commands::Logout => session::handle_logout_command(globals)?,
        Commands::Whoami(args) => session::handle_whoami_command(globals, args.json)?,
        Commands::Open { path, json } => catalog::handle_open_command(globals, &path, json)?,
        Commands::Courses { search, json } => {
            let app = crate::open_app(globals)?;
            catalog::show_courses(&app, search.as_deref(), json)?
        }
        Commands::Course { id, json } => {
            let app = crate::open_app(globals)?;
            catalog::show_course(&app, &id, json)?
        }
        Commands::Enroll { course_id } => catalog::handle_enroll_command(globals, &course_id)?,
        Commands::Lesson { id, json } => {
            let app = crate::open_app(globals)?;
            catalog::show_lesson(&app, &id, json)?
        }
        Commands::Complete { lesson_id } => {
            catalog::handle_complete_command(globals, &lesson_id)?
        }
        Commands::Certificate { lesson_id, json } => {
            catalog::handle_certificate_command(globals, &lesson_id, json)?
        }
        Commands::Profile { command } => match command {
            ProfileCommands::Show(args) => {
                let app = crate::open_app(globals)?;
                session::show_profile(&app, args.json)?
            }
            ProfileCommands::Update {
                first_name,
                last_name,
                email,
            } => session::handle_profile_update(globals, first_name, last_name, email)?,
            ProfileCommands::Password { current, new } => {
                session::handle_password_command(globals, &current, &new)?
            }
        },
        Commands::Dashboard(args) => {
            let app = crate::open_app(globals)?;
            catalog::show_dashboard(&app, args.json)?
        }
        Commands::Instructor { command } => match command {
            InstructorCommands::Courses(args) => {
                let app = crate::open_app(globals)?;
                authoring::show_own_courses(&app, args.json)?
            }
            InstructorCommands::Create { fields } => {
                authoring::handle_create_command(globals, fields)?
            }
            InstructorCommands::Edit { id, fields } => {
                authoring::handle_edit_command(globals, &id, fields)?
            }
            InstructorCommands::Delete { id } => authoring::handle_delete_command(globals, &id)?,
            InstructorCommands::AddLesson { course_id, fields } => {
                authoring::handle_add_lesson_command(globals, &course_id, fields)?
            }
            InstructorCommands::EditLesson {
                course_id,
                lesson_id,
                fields,
            } => authoring::handle_edit_lesson_command(globals, &course_id, &lesson_id, fields)?,
            InstructorCommands::DeleteLesson {
                course_id,
                lesson_id,
            } => authoring::handle_delete_lesson_command(globals, &course_id, &lesson_id)?,
        },
        Commands::Inbox(args) => {
            let app = crate::open_app(globals)?;
            catalog::show_inbox(&app, args.json)?
        }
        Commands::Message(args) => catalog::handle_message_command(globals, args)?,
        Commands::Admin { command } => match command {
            AdminCommands::Users(args) => {
                let app = crate::open_app(globals)?;
                admin::show_users(&app, args.json)?
            }
            AdminCommands::Ban { user_id } => admin::handle_ban_command(globals, &user_id)?,
            AdminCommands::Suspend { user_id, until } => {
                admin::handle_suspend_command(globals, &user_id, &until)?
            }
            AdminCommands::Reactivate { user_id } => {
                admin::handle_reactivate_command(globals, &user_id)?
            }
        },
    }

    Ok(())
}

/// Runs the guard for `route`, turning a redirect into a CLI error.
pub(super) fn require_route(app: &App<LocalStore>, route: &Route) -> Result<()> {
    match app.guard.check(route) {
        GuardDecision::Render => Ok(()),
        GuardDecision::Redirect(Route::Login) => anyhow::bail!(
            "sign in first (run `lectern login --email ... --password ...`)"
        ),
        GuardDecision::Redirect(_) => {
            anyhow::bail!("{} is not available for your role", route.path())
        }
        GuardDecision::Placeholder => anyhow::bail!("session is still being restored"),
    }
}

pub(super) fn loaded<T>(state: &ViewState<T>) -> Result<&T> {
    match state {
        ViewState::Ready(v) => Ok(v),
        ViewState::Failed(msg) => anyhow::bail!("{}", msg),
        ViewState::Loading => anyhow::bail!("view did not finish loading"),
    }
}

pub(super) fn finish(ok: bool, notice: Option<&str>, done: &str) -> Result<()> {
    if !ok {
        anyhow::bail!("{}", notice.unwrap_or("request failed"));
    }
    println!("{}", notice.unwrap_or(done));
    Ok(())
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T, label: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {}", label))?
    );
    Ok(())
}
