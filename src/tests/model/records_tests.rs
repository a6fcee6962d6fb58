use super::*;

#[test]
fn progress_decodes_with_only_the_course() {
    let p: Progress = serde_json::from_str(r#"{"courseId":"10"}"#).unwrap();
    assert_eq!(p.course_id, CourseId::new("10"));
    assert!(p.completed_lesson_ids.is_empty());
    assert_eq!(p.percent(), 0);
    assert!(!p.is_course_complete());
}

#[test]
fn progress_percent_clamps_to_total() {
    let mut p = Progress {
        course_id: CourseId::new("10"),
        completed_lesson_ids: vec![LessonId::new("101")],
        total_lessons: 2,
    };
    assert!(p.is_completed(&LessonId::new("101")));
    assert_eq!(p.percent(), 50);

    p.completed_lesson_ids.push(LessonId::new("102"));
    p.completed_lesson_ids.push(LessonId::new("103"));
    assert_eq!(p.percent(), 100);
    assert!(p.is_course_complete());
}
