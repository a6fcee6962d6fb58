use anyhow::Result;

use lectern::app::App;
use lectern::guard::GuardDecision;
use lectern::model::{CourseId, LessonId, Role, UserId};
use lectern::remote::MessageDraft;
use lectern::routes::Route;
use lectern::store::LocalStore;
use lectern::views::{
    CourseDetailView, CourseListView, InboxView, LessonView, StudentDashboardView,
};

use super::{finish, loaded, print_json, require_route};
use crate::MessageArgs;
use crate::cli_runtime::Globals;

pub(super) fn handle_open_command(globals: &Globals, path: &str, json: bool) -> Result<()> {
    let app = crate::open_app(globals)?;
    let (route, decision) = app.guard.navigate(path);
    let target = match (&decision, route) {
        (GuardDecision::Render, Some(route)) => route,
        (GuardDecision::Redirect(to), _) => {
            if json {
                return print_json(
                    &serde_json::json!({"path": path, "redirect": to.path()}),
                    "navigation",
                );
            }
            println!("redirect: {}", to.path());
            return Ok(());
        }
        (GuardDecision::Placeholder, _) | (GuardDecision::Render, None) => {
            println!("loading");
            return Ok(());
        }
    };

    match &target {
        Route::Home | Route::Courses => show_courses(&app, None, json),
        Route::CourseDetail(id) => show_course(&app, id.as_str(), json),
        Route::Lesson(id) => show_lesson(&app, id.as_str(), json),
        Route::Profile => super::session::show_profile(&app, json),
        Route::Inbox => show_inbox(&app, json),
        Route::StudentDashboard | Route::InstructorDashboard => show_dashboard(&app, json),
        Route::NewCourse => {
            println!("new course form (use `lectern instructor create`)");
            Ok(())
        }
        Route::EditCourse(id) => super::authoring::show_editor(&app, id, json),
        Route::AdminUsers => super::admin::show_users(&app, json),
        Route::Login | Route::Register => {
            println!("{} form", target.path());
            Ok(())
        }
    }
}

pub(super) fn show_courses(app: &App<LocalStore>, search: Option<&str>, json: bool) -> Result<()> {
    let mut view = CourseListView::new(app.context());
    view.load();
    loaded(&view.state)?;
    let courses = view.filtered(search.unwrap_or_default());
    if json {
        return print_json(&courses, "courses");
    }
    if courses.is_empty() {
        println!("No courses found");
    }
    for c in courses {
        let by = c.instructor_name.as_deref().unwrap_or("unknown instructor");
        println!("{} {} ({}, {:.2})", c.id, c.title, by, c.price);
    }
    Ok(())
}

pub(super) fn show_course(app: &App<LocalStore>, id: &str, json: bool) -> Result<()> {
    let mut view = CourseDetailView::new(app.context(), CourseId::new(id));
    view.load();
    let detail = loaded(&view.state)?;
    if json {
        return print_json(
            &serde_json::json!({
                "course": detail.course,
                "lessons": detail.lessons,
                "enrolled": detail.enrolled,
                "canEditCourse": detail.capabilities.can_edit_course,
                "canMessage": detail.capabilities.can_message,
                "hasAccess": detail.capabilities.has_access,
            }),
            "course",
        );
    }
    println!("{}", detail.course.title);
    if !detail.course.description.is_empty() {
        println!("{}", detail.course.description);
    }
    if detail.enrolled {
        println!("(enrolled)");
    }
    match detail.empty_state() {
        Some(msg) => println!("{}", msg),
        None => {
            for l in &detail.lessons {
                println!("  {}. {} [{}]", l.order_index, l.title, l.id);
            }
        }
    }
    Ok(())
}

pub(super) fn handle_enroll_command(globals: &Globals, course_id: &str) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = CourseDetailView::new(app.context(), CourseId::new(course_id));
    view.load();
    loaded(&view.state)?;
    let ok = view.enroll();
    finish(ok, view.notice.as_deref(), "Enrolled")
}

fn load_lesson(app: &App<LocalStore>, id: &str) -> Result<LessonView> {
    let route = Route::Lesson(LessonId::new(id));
    require_route(app, &route)?;
    let mut view = LessonView::new(app.context(), LessonId::new(id));
    view.load();
    loaded(&view.state)?;
    Ok(view)
}

pub(super) fn show_lesson(app: &App<LocalStore>, id: &str, json: bool) -> Result<()> {
    let view = load_lesson(app, id)?;
    let page = loaded(&view.state)?;
    if json {
        return print_json(
            &serde_json::json!({"lesson": page.lesson, "progress": page.progress}),
            "lesson",
        );
    }
    println!("{}", page.lesson.title);
    if let Some(url) = &page.lesson.video_url {
        println!("video: {}", url);
    }
    println!();
    println!("{}", page.lesson.content);
    if let Some(p) = &page.progress {
        let done = if page.is_completed() {
            "completed"
        } else {
            "not completed"
        };
        println!();
        println!("{} · course progress {}%", done, p.percent());
    }
    Ok(())
}

pub(super) fn handle_complete_command(globals: &Globals, lesson_id: &str) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = load_lesson(&app, lesson_id)?;
    let ok = view.mark_complete();
    finish(ok, view.notice.as_deref(), "Lesson completed")
}

pub(super) fn handle_certificate_command(
    globals: &Globals,
    lesson_id: &str,
    json: bool,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = load_lesson(&app, lesson_id)?;
    let Some(cert) = view.certificate() else {
        anyhow::bail!("{}", view.notice.as_deref().unwrap_or("certificate unavailable"));
    };
    if json {
        return print_json(&cert, "certificate");
    }
    println!("certificate: {}", cert.id);
    if let Some(title) = &cert.course_title {
        println!("course: {}", title);
    }
    if let Some(url) = &cert.certificate_url {
        println!("download: {}", url);
    }
    Ok(())
}

pub(super) fn show_dashboard(app: &App<LocalStore>, json: bool) -> Result<()> {
    let state = app.state();
    let Some(role) = state.role() else {
        anyhow::bail!("sign in first (run `lectern login --email ... --password ...`)");
    };
    match role {
        Role::Student => {
            require_route(app, &Route::StudentDashboard)?;
            let mut view = StudentDashboardView::new(app.context());
            view.load();
            let enrollments = loaded(&view.state)?;
            if json {
                return print_json(enrollments, "enrollments");
            }
            if enrollments.is_empty() {
                println!("Not enrolled in any course yet");
            }
            for e in enrollments {
                let title = e.course_title.as_deref().unwrap_or("untitled course");
                println!("{} {} {:.0}%", e.course_id, title, e.progress_percent);
            }
            Ok(())
        }
        Role::Instructor => super::authoring::show_own_courses(app, json),
        Role::Admin => super::admin::show_users(app, json),
    }
}

pub(super) fn show_inbox(app: &App<LocalStore>, json: bool) -> Result<()> {
    require_route(app, &Route::Inbox)?;
    let mut view = InboxView::new(app.context());
    view.load();
    let messages = loaded(&view.state)?;
    if json {
        return print_json(messages, "messages");
    }
    println!("{} unread", view.unread());
    for m in messages {
        let from = m.sender_name.as_deref().unwrap_or(m.sender_id.as_str());
        let mark = if m.is_read { " " } else { "*" };
        println!("{} {} {}: {}", mark, m.id, from, m.subject);
    }
    Ok(())
}

pub(super) fn handle_message_command(globals: &Globals, args: MessageArgs) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::Inbox)?;
    let mut view = InboxView::new(app.context());
    let ok = view.send(&MessageDraft {
        recipient_id: UserId::new(args.to),
        subject: args.subject,
        body: args.body,
    });
    finish(ok, view.notice.as_deref(), "Message sent")
}
