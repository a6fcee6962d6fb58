use anyhow::Result;

use lectern::app::App;
use lectern::model::{AccountStatus, UserId};
use lectern::routes::Route;
use lectern::store::LocalStore;
use lectern::views::AdminUsersView;

use super::{finish, loaded, print_json, require_route};
use crate::cli_runtime::Globals;

pub(super) fn show_users(app: &App<LocalStore>, json: bool) -> Result<()> {
    require_route(app, &Route::AdminUsers)?;
    let mut view = AdminUsersView::new(app.context());
    view.load();
    let users = loaded(&view.state)?;
    if json {
        return print_json(users, "users");
    }
    for u in users {
        let status = match (u.status, &u.suspended_until) {
            (AccountStatus::Suspended, Some(until)) => format!("suspended until {}", until),
            (AccountStatus::Suspended, None) => "suspended".to_string(),
            (AccountStatus::Banned, _) => "banned".to_string(),
            (AccountStatus::Active, _) => "active".to_string(),
        };
        println!(
            "{} {} {} <{}> {} [{}]",
            u.id, u.first_name, u.last_name, u.email, u.role, status
        );
    }
    Ok(())
}

fn change_status(
    globals: &Globals,
    user_id: &str,
    status: AccountStatus,
    until: Option<&str>,
    done: &str,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::AdminUsers)?;
    let mut view = AdminUsersView::new(app.context());
    let ok = view.set_status(&UserId::new(user_id), status, until);
    finish(ok, view.notice.as_deref(), done)
}

pub(super) fn handle_ban_command(globals: &Globals, user_id: &str) -> Result<()> {
    change_status(globals, user_id, AccountStatus::Banned, None, "User banned")
}

pub(super) fn handle_suspend_command(globals: &Globals, user_id: &str, until: &str) -> Result<()> {
    let date = time::Date::parse(until, time::macros::format_description!("[year]-[month]-[day]"))
        .map_err(|_| anyhow::anyhow!("invalid date {:?} (expected YYYY-MM-DD)", until))?;
    change_status(
        globals,
        user_id,
        AccountStatus::Suspended,
        Some(&date.to_string()),
        "User suspended",
    )
}

pub(super) fn handle_reactivate_command(globals: &Globals, user_id: &str) -> Result<()> {
    change_status(globals, user_id, AccountStatus::Active, None, "User reactivated")
}
