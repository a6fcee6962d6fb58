use anyhow::Result;

use lectern::app::App;
use lectern::remote::{ProfileUpdate, RegistrationFields, RegistrationKind};
use lectern::routes::Route;
use lectern::session::SessionState;
use lectern::store::LocalStore;
use lectern::views::{LoginOutcome, LoginView, ProfileView, RegisterView, Rejection};

use super::{finish, loaded, print_json, require_route};
use crate::cli_runtime::Globals;
use crate::{AccountKind, LoginArgs, RegisterArgs};

pub(super) fn handle_config_show(globals: &Globals, json: bool) -> Result<()> {
    let cfg = globals.store.read_config()?;
    if json {
        return print_json(&cfg, "config");
    }
    println!("state_dir: {}", globals.store.root().display());
    println!("base_url: {}", cfg.base_url);
    match cfg.request_timeout_secs {
        Some(secs) => println!("timeout: {}s", secs),
        None => println!("timeout: transport default"),
    }
    Ok(())
}

pub(super) fn handle_config_set(
    globals: &Globals,
    url: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    let mut cfg = globals.store.read_config()?;
    if let Some(url) = url {
        cfg.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = timeout_secs {
        cfg.request_timeout_secs = (secs > 0).then_some(secs);
    }
    globals.store.write_config(&cfg)?;
    println!("Configuration saved");
    Ok(())
}

fn report(outcome: LoginOutcome) -> Result<()> {
    match outcome {
        LoginOutcome::Redirect(route) => {
            println!("Signed in; continue at {}", route.path());
            Ok(())
        }
        LoginOutcome::Rejected(rejection) => Err(rejection_error(rejection)),
    }
}

fn rejection_error(rejection: Rejection) -> anyhow::Error {
    let mut lines = vec![rejection.message];
    lines.extend(rejection.errors.into_iter().map(|e| format!("- {}", e)));
    if let Some(notice) = rejection.notice {
        lines.push(notice.guidance());
    }
    anyhow::anyhow!(lines.join("\n"))
}

pub(super) fn handle_login_command(globals: &Globals, args: LoginArgs) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = LoginView::new(None);
    report(view.submit(&app.session, &args.email, &args.password))
}

pub(super) fn handle_register_command(globals: &Globals, args: RegisterArgs) -> Result<()> {
    let app = crate::open_app(globals)?;
    let kind = match args.kind {
        AccountKind::Student => RegistrationKind::Student,
        AccountKind::Instructor => RegistrationKind::Instructor,
    };
    let mut view = RegisterView::new(kind);
    view.confirm_password = args.password.clone();
    view.fields = RegistrationFields {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password: args.password,
        bio: args.bio,
        expertise: args.expertise,
    };
    report(view.submit(&app.session))
}

pub(super) fn handle_logout_command(globals: &Globals) -> Result<()> {
    let app = crate::open_app(globals)?;
    app.session.logout();
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_whoami_command(globals: &Globals, json: bool) -> Result<()> {
    let app = crate::open_app(globals)?;
    let SessionState::Authenticated(session) = app.state() else {
        anyhow::bail!("not signed in");
    };
    let who = session.identity;
    if json {
        return print_json(&who, "identity");
    }
    println!("user: {}", who.display_name());
    println!("user_id: {}", who.id);
    println!("email: {}", who.email);
    println!("role: {}", who.role);
    Ok(())
}

pub(super) fn show_profile(app: &App<LocalStore>, json: bool) -> Result<()> {
    require_route(app, &Route::Profile)?;
    let mut view = ProfileView::new(app.context());
    view.load();
    let me = loaded(&view.state)?;
    if json {
        return print_json(me, "profile");
    }
    println!("name: {}", me.display_name());
    println!("email: {}", me.email);
    println!("role: {}", me.role);
    Ok(())
}

pub(super) fn handle_profile_update(
    globals: &Globals,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::Profile)?;
    let mut view = ProfileView::new(app.context());
    let ok = view.save(
        &app.session,
        &ProfileUpdate {
            first_name,
            last_name,
            email,
        },
    );
    finish(ok, view.notice.as_deref(), "Profile updated")
}

pub(super) fn handle_password_command(globals: &Globals, current: &str, new: &str) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::Profile)?;
    let mut view = ProfileView::new(app.context());
    let ok = view.change_password(current, new, new);
    finish(ok, view.notice.as_deref(), "Password updated")
}
