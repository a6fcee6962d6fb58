#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::oneshot;

use lectern::model::ClientConfig;

/// Token the backend never accepts; stands in for an expired credential.
pub const STALE_TOKEN: &str = "stale-token";

pub const LEARNER: (&str, &str) = ("learner@example.com", "password1");
pub const INSTRUCTOR: (&str, &str) = ("teacher@example.com", "password2");
pub const BANNED: (&str, &str) = ("banned@example.com", "password3");
pub const SUSPENDED: (&str, &str) = ("paused@example.com", "password4");
pub const ADMIN: (&str, &str) = ("admin@example.com", "password5");

pub const LEARNER_ID: &str = "1";
pub const INSTRUCTOR_ID: &str = "2";
pub const BANNED_ID: &str = "3";

/// Seeded courses: `10` has two lessons, `11` none. `boom` always fails
/// with a 500.
pub const COURSE_WITH_LESSONS: &str = "10";
pub const EMPTY_COURSE: &str = "11";
pub const BROKEN_COURSE: &str = "boom";

pub struct ServerGuard {
    pub base_url: String,
    state: Shared,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ServerGuard {
    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            ..ClientConfig::default()
        }
    }

    /// Every issued token stops being accepted, as if it expired.
    pub fn revoke_tokens(&self) {
        self.state.lock().unwrap().revoked = true;
    }

    /// The profile endpoint answers 503 while set.
    pub fn set_profile_outage(&self, on: bool) {
        self.state.lock().unwrap().profile_outage = on;
    }

    /// Lesson completion acknowledges with `data: null` while set.
    pub fn set_terse_progress(&self, on: bool) {
        self.state.lock().unwrap().terse_progress = on;
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

struct User {
    id: u32,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    // Sent with its original casing; the client normalizes it.
    role: &'static str,
    status: &'static str,
    suspended_until: Option<String>,
    blocked: Option<String>,
}

impl User {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "role": self.role,
        })
    }

    fn summary_json(&self) -> Value {
        json!({
            "id": self.id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "role": self.role,
            "status": self.status,
            "suspendedUntil": self.suspended_until,
        })
    }

    fn is(&self, role: &str) -> bool {
        self.role.eq_ignore_ascii_case(role)
    }
}

struct Backend {
    users: Vec<User>,
    courses: Vec<Value>,
    lessons: Vec<Value>,
    messages: Vec<Value>,
    enrolled: BTreeSet<(u32, String)>,
    completed: BTreeMap<u32, BTreeSet<String>>,
    next_id: u32,
    revoked: bool,
    profile_outage: bool,
    terse_progress: bool,
}

impl Backend {
    fn fresh_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

type Shared = Arc<Mutex<Backend>>;

fn user(
    id: u32,
    first_name: &str,
    last_name: &str,
    (email, password): (&str, &str),
    role: &'static str,
    status: &'static str,
    blocked: Option<&str>,
) -> User {
    User {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role,
        status,
        suspended_until: None,
        blocked: blocked.map(str::to_string),
    }
}

fn seed() -> Backend {
    let mut paused = user(
        4,
        "Pat",
        "Paused",
        SUSPENDED,
        "student",
        "suspended",
        Some("Your account is suspended until 2026-12-01T00:00:00Z."),
    );
    paused.suspended_until = Some("2026-12-01T00:00:00Z".to_string());
    Backend {
        users: vec![
            user(1, "Lena", "Learner", LEARNER, "Student", "active", None),
            user(2, "Ian", "Instructor", INSTRUCTOR, "instructor", "active", None),
            user(
                3,
                "Bo",
                "Banned",
                BANNED,
                "student",
                "banned",
                Some("Your account has been banned."),
            ),
            paused,
            user(5, "Ada", "Admin", ADMIN, "Admin", "active", None),
        ],
        courses: vec![
            json!({"id": 10, "title": "Rust Basics", "description": "Ownership and borrowing",
                   "category": "Programming", "price": 0, "instructorId": 2,
                   "instructorName": "Ian Instructor"}),
            json!({"id": 11, "title": "Empty Course", "description": "",
                   "price": 15.5, "instructorId": 2}),
        ],
        lessons: vec![
            json!({"id": 100, "courseId": 10, "title": "Borrowing", "content": "...",
                   "orderIndex": 2}),
            json!({"id": 101, "courseId": 10, "title": "Ownership", "content": "...",
                   "orderIndex": 1}),
        ],
        messages: vec![json!({
            "id": 500, "senderId": 2, "senderName": "Ian Instructor", "recipientId": 1,
            "subject": "Welcome", "body": "Glad to have you.", "isRead": false,
        })],
        enrolled: BTreeSet::from([(1, COURSE_WITH_LESSONS.to_string())]),
        completed: BTreeMap::new(),
        next_id: 1000,
        revoked: false,
        profile_outage: false,
        terse_progress: false,
    }
}

fn ok(data: Value) -> Response {
    (
        StatusCode::OK,
        Json(json!({"isSuccess": true, "message": "", "data": data, "statusCode": 200})),
    )
        .into_response()
}

/// Success that carries no payload.
fn ack(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "isSuccess": true,
            "message": message,
            "data": null,
            "statusCode": status.as_u16(),
        })),
    )
        .into_response()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({
            "isSuccess": false,
            "message": message,
            "errors": [],
            "data": null,
            "statusCode": status.as_u16(),
        })),
    )
        .into_response()
}

fn id_of(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn caller(backend: &Backend, headers: &HeaderMap) -> Option<u32> {
    if backend.revoked {
        return None;
    }
    let token = headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let id: u32 = token.strip_prefix("token-")?.parse().ok()?;
    backend.user(id).is_some().then_some(id)
}

macro_rules! signed_in {
    ($backend:expr, $headers:expr) => {
        match caller(&$backend, &$headers) {
            Some(id) => id,
            None => return fail(StatusCode::UNAUTHORIZED, "Unauthorized"),
        }
    };
}

/// Index of a course the caller owns, or the response to send instead.
fn owned_course(backend: &Backend, user: u32, course: &str) -> Result<usize, Response> {
    let Some(idx) = backend.courses.iter().position(|c| id_of(&c["id"]) == course) else {
        return Err(fail(StatusCode::NOT_FOUND, "Course not found."));
    };
    if id_of(&backend.courses[idx]["instructorId"]) != user.to_string() {
        return Err(fail(StatusCode::FORBIDDEN, "You do not own this course."));
    }
    Ok(idx)
}

fn order_taken(backend: &Backend, course: &str, order: &Value, except: Option<&str>) -> bool {
    backend.lessons.iter().any(|l| {
        id_of(&l["courseId"]) == course
            && &l["orderIndex"] == order
            && except.is_none_or(|id| id_of(&l["id"]) != id)
    })
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let backend = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let Some(user) = backend
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
    else {
        return fail(StatusCode::UNAUTHORIZED, "Invalid email or password.");
    };
    if let Some(reason) = &user.blocked {
        return fail(StatusCode::FORBIDDEN, reason);
    }
    // No embedded user: the client resolves the identity via the profile.
    ok(json!({"token": format!("token-{}", user.id), "role": user.role}))
}

async fn register(
    State(state): State<Shared>,
    Path(_kind): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if backend.users.iter().any(|u| u.email == email) {
        return fail(StatusCode::BAD_REQUEST, "Email is already registered.");
    }
    let id = backend.fresh_id();
    let password = body["password"].as_str().unwrap_or_default();
    // Reported as student regardless of endpoint.
    let user = user(id, "New", "User", (email.as_str(), password), "student", "active", None);
    let data = json!({"token": format!("token-{}", user.id), "user": user.to_json()});
    backend.users.push(user);
    ok(data)
}

async fn profile(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let id = signed_in!(backend, headers);
    if backend.profile_outage {
        return fail(StatusCode::SERVICE_UNAVAILABLE, "Service unavailable.");
    }
    match backend.user(id) {
        Some(user) => ok(user.to_json()),
        None => fail(StatusCode::NOT_FOUND, "User not found."),
    }
}

async fn update_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let id = signed_in!(backend, headers);
    if let Some(email) = body["email"].as_str()
        && backend.users.iter().any(|u| u.email == email && u.id != id)
    {
        return fail(StatusCode::BAD_REQUEST, "Email is already in use.");
    }
    let Some(user) = backend.users.iter_mut().find(|u| u.id == id) else {
        return fail(StatusCode::NOT_FOUND, "User not found.");
    };
    if let Some(first) = body["firstName"].as_str() {
        user.first_name = first.to_string();
    }
    if let Some(last) = body["lastName"].as_str() {
        user.last_name = last.to_string();
    }
    if let Some(email) = body["email"].as_str() {
        user.email = email.to_string();
    }
    ok(user.to_json())
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let id = signed_in!(backend, headers);
    let Some(user) = backend.users.iter_mut().find(|u| u.id == id) else {
        return fail(StatusCode::NOT_FOUND, "User not found.");
    };
    if body["currentPassword"].as_str() != Some(user.password.as_str()) {
        return fail(StatusCode::BAD_REQUEST, "Current password is incorrect.");
    }
    user.password = body["newPassword"].as_str().unwrap_or_default().to_string();
    ack(StatusCode::OK, "Password changed.")
}

async fn list_courses(State(state): State<Shared>) -> Response {
    let backend = state.lock().unwrap();
    ok(Value::Array(backend.courses.clone()))
}

async fn my_courses(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let id = signed_in!(backend, headers);
    if !backend.user(id).is_some_and(|u| u.is("instructor")) {
        return fail(StatusCode::FORBIDDEN, "Instructors only.");
    }
    let mine: Vec<Value> = backend
        .courses
        .iter()
        .filter(|c| id_of(&c["instructorId"]) == id.to_string())
        .cloned()
        .collect();
    ok(Value::Array(mine))
}

async fn create_course(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    if !backend.user(user).is_some_and(|u| u.is("instructor")) {
        return fail(StatusCode::FORBIDDEN, "Instructors only.");
    }
    let mut course = body;
    course["id"] = json!(backend.fresh_id());
    course["instructorId"] = json!(user);
    backend.courses.push(course.clone());
    ok(course)
}

async fn get_course(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    if id == BROKEN_COURSE {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.");
    }
    let backend = state.lock().unwrap();
    match backend.courses.iter().find(|c| id_of(&c["id"]) == id) {
        Some(course) => ok(course.clone()),
        None => fail(StatusCode::NOT_FOUND, "Course not found."),
    }
}

async fn update_course(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let idx = match owned_course(&backend, user, &id) {
        Ok(idx) => idx,
        Err(res) => return res,
    };
    let course = &mut backend.courses[idx];
    if let (Some(target), Some(fields)) = (course.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    ok(course.clone())
}

async fn delete_course(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let idx = match owned_course(&backend, user, &id) {
        Ok(idx) => idx,
        Err(res) => return res,
    };
    backend.courses.remove(idx);
    backend.lessons.retain(|l| id_of(&l["courseId"]) != id);
    ack(StatusCode::OK, "Course deleted.")
}

async fn course_lessons(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let backend = state.lock().unwrap();
    let lessons: Vec<Value> = backend
        .lessons
        .iter()
        .filter(|l| id_of(&l["courseId"]) == id)
        .cloned()
        .collect();
    ok(Value::Array(lessons))
}

async fn create_lesson(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(course): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    if let Err(res) = owned_course(&backend, user, &course) {
        return res;
    }
    if order_taken(&backend, &course, &body["orderIndex"], None) {
        return fail(
            StatusCode::BAD_REQUEST,
            "A lesson with this order already exists.",
        );
    }
    let mut lesson = body;
    lesson["id"] = json!(backend.fresh_id());
    lesson["courseId"] = json!(course);
    backend.lessons.push(lesson.clone());
    ok(lesson)
}

async fn get_lesson(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let backend = state.lock().unwrap();
    signed_in!(backend, headers);
    match backend.lessons.iter().find(|l| id_of(&l["id"]) == id) {
        Some(lesson) => ok(lesson.clone()),
        None => fail(StatusCode::NOT_FOUND, "Lesson not found."),
    }
}

/// Index of a lesson whose course the caller owns.
fn owned_lesson(backend: &Backend, user: u32, lesson: &str) -> Result<usize, Response> {
    let Some(idx) = backend.lessons.iter().position(|l| id_of(&l["id"]) == lesson) else {
        return Err(fail(StatusCode::NOT_FOUND, "Lesson not found."));
    };
    owned_course(backend, user, &id_of(&backend.lessons[idx]["courseId"]))?;
    Ok(idx)
}

async fn update_lesson(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let idx = match owned_lesson(&backend, user, &id) {
        Ok(idx) => idx,
        Err(res) => return res,
    };
    let course = id_of(&backend.lessons[idx]["courseId"]);
    if order_taken(&backend, &course, &body["orderIndex"], Some(id.as_str())) {
        return fail(
            StatusCode::BAD_REQUEST,
            "A lesson with this order already exists.",
        );
    }
    let lesson = &mut backend.lessons[idx];
    if let (Some(target), Some(fields)) = (lesson.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            target.insert(k.clone(), v.clone());
        }
    }
    ok(lesson.clone())
}

async fn delete_lesson(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let idx = match owned_lesson(&backend, user, &id) {
        Ok(idx) => idx,
        Err(res) => return res,
    };
    backend.lessons.remove(idx);
    ack(StatusCode::OK, "Lesson deleted.")
}

async fn enrollment_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(course): Path<String>,
) -> Response {
    let backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    ok(json!({"isEnrolled": backend.enrolled.contains(&(user, course))}))
}

// Acknowledges without echoing the enrollment.
async fn enroll(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let course = id_of(&body["courseId"]);
    if !backend.enrolled.insert((user, course)) {
        return fail(StatusCode::BAD_REQUEST, "Already enrolled in this course.");
    }
    ack(StatusCode::CREATED, "Enrolled successfully")
}

async fn my_enrollments(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let rows: Vec<Value> = backend
        .enrolled
        .iter()
        .filter(|(student, _)| *student == user)
        .enumerate()
        .map(|(n, (_, course))| {
            let title = backend
                .courses
                .iter()
                .find(|c| id_of(&c["id"]) == *course)
                .map(|c| c["title"].clone());
            json!({"id": 900 + n, "courseId": course, "courseTitle": title, "studentId": user})
        })
        .collect();
    ok(Value::Array(rows))
}

fn progress_json(backend: &Backend, user: u32, course: &str) -> Value {
    let total = backend
        .lessons
        .iter()
        .filter(|l| id_of(&l["courseId"]) == course)
        .count();
    let done: Vec<String> = backend
        .lessons
        .iter()
        .filter(|l| id_of(&l["courseId"]) == course)
        .map(|l| id_of(&l["id"]))
        .filter(|id| backend.completed.get(&user).is_some_and(|s| s.contains(id)))
        .collect();
    json!({"courseId": course, "completedLessonIds": done, "totalLessons": total})
}

async fn course_progress(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(course): Path<String>,
) -> Response {
    let backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    if !backend.enrolled.contains(&(user, course.clone())) {
        return fail(StatusCode::FORBIDDEN, "Not enrolled in this course.");
    }
    ok(progress_json(&backend, user, &course))
}

async fn complete_lesson(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(lesson): Path<String>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let Some(course) = backend
        .lessons
        .iter()
        .find(|l| id_of(&l["id"]) == lesson)
        .map(|l| id_of(&l["courseId"]))
    else {
        return fail(StatusCode::NOT_FOUND, "Lesson not found.");
    };
    if !backend.enrolled.contains(&(user, course.clone())) {
        return fail(StatusCode::FORBIDDEN, "Not enrolled in this course.");
    }
    backend.completed.entry(user).or_default().insert(lesson);
    if backend.terse_progress {
        return ack(StatusCode::OK, "Lesson completed.");
    }
    ok(progress_json(&backend, user, &course))
}

async fn inbox(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let user = signed_in!(backend, headers);
    let mine: Vec<Value> = backend
        .messages
        .iter()
        .filter(|m| id_of(&m["recipientId"]) == user.to_string())
        .cloned()
        .collect();
    ok(Value::Array(mine))
}

async fn send_message(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let sender = signed_in!(backend, headers);
    let recipient = id_of(&body["recipientId"]);
    if !backend.users.iter().any(|u| u.id.to_string() == recipient) {
        return fail(StatusCode::NOT_FOUND, "Recipient not found.");
    }
    let sender_name = backend
        .user(sender)
        .map(|u| format!("{} {}", u.first_name, u.last_name));
    let message = json!({
        "id": backend.fresh_id(),
        "senderId": sender,
        "senderName": sender_name,
        "recipientId": recipient,
        "subject": body["subject"],
        "body": body["body"],
        "isRead": false,
    });
    backend.messages.push(message.clone());
    ok(message)
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let id = signed_in!(backend, headers);
    if !backend.user(id).is_some_and(|u| u.is("admin")) {
        return fail(StatusCode::FORBIDDEN, "Administrators only.");
    }
    ok(backend.users.iter().map(User::summary_json).collect())
}

// Acknowledges without echoing the updated row.
async fn set_user_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let admin = signed_in!(backend, headers);
    if !backend.user(admin).is_some_and(|u| u.is("admin")) {
        return fail(StatusCode::FORBIDDEN, "Administrators only.");
    }
    let Some(user) = backend.users.iter_mut().find(|u| u.id.to_string() == id) else {
        return fail(StatusCode::NOT_FOUND, "User not found.");
    };
    let until = body["suspendedUntil"].as_str().map(str::to_string);
    (user.status, user.blocked) = match body["status"].as_str() {
        Some("banned") => ("banned", Some("Your account has been banned.".to_string())),
        Some("suspended") => (
            "suspended",
            Some(format!(
                "Your account is suspended until {}.",
                until.as_deref().unwrap_or_default()
            )),
        ),
        _ => ("active", None),
    };
    user.suspended_until = until;
    ack(StatusCode::OK, "User status updated.")
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register/:kind", post(register))
        .route("/api/users/profile", get(profile).put(update_profile))
        .route("/api/users/password", put(change_password))
        .route("/api/courses", get(list_courses).post(create_course))
        .route("/api/courses/mine", get(my_courses))
        .route(
            "/api/courses/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/api/courses/:id/lessons",
            get(course_lessons).post(create_lesson),
        )
        .route(
            "/api/lessons/:id",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
        .route("/api/enrollments", post(enroll))
        .route("/api/enrollments/mine", get(my_enrollments))
        .route("/api/enrollments/status/:course", get(enrollment_status))
        .route("/api/progress/courses/:course", get(course_progress))
        .route("/api/progress/lessons/:lesson/complete", post(complete_lesson))
        .route("/api/messages", post(send_message))
        .route("/api/messages/inbox", get(inbox))
        .route("/api/admin/users", get(list_users))
        .route("/api/admin/users/:id/status", put(set_user_status))
        .with_state(state)
}

/// Starts the mock backend on an ephemeral port. It stops when the guard
/// drops.
pub fn spawn_server() -> Result<ServerGuard> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind mock backend")?;
    listener
        .set_nonblocking(true)
        .context("set listener nonblocking")?;
    let addr = listener.local_addr().context("read listener address")?;
    let (tx, rx) = oneshot::channel::<()>();
    let state: Shared = Arc::new(Mutex::new(seed()));
    let app = router(Arc::clone(&state));

    let handle = thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("build tokio runtime");
        rt.block_on(async move {
            let listener =
                tokio::net::TcpListener::from_std(listener).expect("adopt std listener");
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .expect("serve mock backend");
        });
    });

    Ok(ServerGuard {
        base_url: format!("http://{}/api", addr),
        state,
        shutdown: Some(tx),
        handle: Some(handle),
    })
}

/// An address nothing listens on.
pub fn dead_base_url() -> Result<String> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").context("bind spare listener")?;
    let addr = listener.local_addr().context("read spare address")?;
    drop(listener);
    Ok(format!("http://{}/api", addr))
}
