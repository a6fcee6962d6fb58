use anyhow::Result;

use lectern::app::App;
use lectern::model::{CourseId, LessonId};
use lectern::remote::{CourseDraft, LessonDraft};
use lectern::routes::Route;
use lectern::store::LocalStore;
use lectern::views::{CourseEditorView, EditorMode, InstructorDashboardView};

use super::{finish, loaded, print_json, require_route};
use crate::cli_runtime::Globals;
use crate::{CourseFields, LessonFields};

fn draft(fields: CourseFields) -> CourseDraft {
    CourseDraft {
        title: fields.title,
        description: fields.description,
        category: fields.category,
        level: fields.level,
        price: fields.price,
        thumbnail_url: fields.thumbnail_url,
    }
}

fn lesson_draft(fields: LessonFields) -> LessonDraft {
    LessonDraft {
        title: fields.title,
        content: fields.content,
        video_url: fields.video_url,
        order_index: fields.order,
        duration_minutes: fields.duration_minutes,
    }
}

fn open_editor(app: &App<LocalStore>, id: &CourseId) -> Result<CourseEditorView> {
    require_route(app, &Route::EditCourse(id.clone()))?;
    let mut view = CourseEditorView::new(app.context(), EditorMode::Edit(id.clone()));
    view.load();
    loaded(&view.state)?;
    Ok(view)
}

pub(super) fn show_own_courses(app: &App<LocalStore>, json: bool) -> Result<()> {
    require_route(app, &Route::InstructorDashboard)?;
    let mut view = InstructorDashboardView::new(app.context());
    view.load();
    let courses = loaded(&view.state)?;
    if json {
        return print_json(courses, "courses");
    }
    if courses.is_empty() {
        println!("No courses yet (run `lectern instructor create --title ...`)");
    }
    for c in courses {
        println!("{} {} ({:.2})", c.id, c.title, c.price);
    }
    Ok(())
}

pub(super) fn show_editor(app: &App<LocalStore>, id: &CourseId, json: bool) -> Result<()> {
    let view = open_editor(app, id)?;
    let data = loaded(&view.state)?;
    if json {
        return print_json(
            &serde_json::json!({"course": data.course, "lessons": data.lessons}),
            "course",
        );
    }
    if let Some(course) = &data.course {
        println!("{} (editing)", course.title);
    }
    for l in &data.lessons {
        println!("  {}. {} [{}]", l.order_index, l.title, l.id);
    }
    Ok(())
}

pub(super) fn handle_create_command(globals: &Globals, fields: CourseFields) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::NewCourse)?;
    let mut view = CourseEditorView::new(app.context(), EditorMode::New);
    let ok = view.save(&draft(fields));
    if let (true, EditorMode::Edit(id)) = (ok, &view.mode) {
        println!("Course created: {}", id);
        return Ok(());
    }
    finish(ok, view.notice.as_deref(), "Course created")
}

pub(super) fn handle_edit_command(globals: &Globals, id: &str, fields: CourseFields) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = open_editor(&app, &CourseId::new(id))?;
    let ok = view.save(&draft(fields));
    finish(ok, view.notice.as_deref(), "Course updated")
}

pub(super) fn handle_delete_command(globals: &Globals, id: &str) -> Result<()> {
    let app = crate::open_app(globals)?;
    require_route(&app, &Route::InstructorDashboard)?;
    let mut view = InstructorDashboardView::new(app.context());
    let ok = view.delete(&CourseId::new(id));
    finish(ok, view.notice.as_deref(), "Course deleted")
}

pub(super) fn handle_add_lesson_command(
    globals: &Globals,
    course_id: &str,
    fields: LessonFields,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = open_editor(&app, &CourseId::new(course_id))?;
    let ok = view.add_lesson(&lesson_draft(fields));
    finish(ok, view.notice.as_deref(), "Lesson added")
}

pub(super) fn handle_edit_lesson_command(
    globals: &Globals,
    course_id: &str,
    lesson_id: &str,
    fields: LessonFields,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = open_editor(&app, &CourseId::new(course_id))?;
    let ok = view.update_lesson(&LessonId::new(lesson_id), &lesson_draft(fields));
    finish(ok, view.notice.as_deref(), "Lesson updated")
}

pub(super) fn handle_delete_lesson_command(
    globals: &Globals,
    course_id: &str,
    lesson_id: &str,
) -> Result<()> {
    let app = crate::open_app(globals)?;
    let mut view = open_editor(&app, &CourseId::new(course_id))?;
    let ok = view.delete_lesson(&LessonId::new(lesson_id));
    finish(ok, view.notice.as_deref(), "Lesson deleted")
}
