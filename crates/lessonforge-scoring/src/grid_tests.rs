//! Tests for the lesson grid.

use lessonforge_core::{ClassId, CurriculumItem, Day, SubjectId, TeacherId, TimetableProblem};
use lessonforge_model::Model;
use lessonforge_test::problems::dense_two_classes;
use lessonforge_test::slot;

use crate::grid::LessonGrid;

fn build(problem: &TimetableProblem) -> (Model, LessonGrid) {
    let mut model = Model::new();
    let grid = LessonGrid::build(problem, &mut model);
    (model, grid)
}

#[test]
fn test_one_variable_per_item_and_class_slot() {
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_class("1M", 30)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 5))
        .with_item(CurriculumItem::new("Ana", "Math", "1M", 5))
        .with_item(CurriculumItem::new("Bruno", "Art", "1M", 2));

    let (model, grid) = build(&problem);

    // 6A has 5 periods, 1M has 6.
    assert_eq!(grid.lessons().len(), 25 + 30 + 30);
    assert_eq!(model.variables().len(), grid.lessons().len());
    assert_eq!(grid.school_max_periods(), 6);
    assert_eq!(grid.class_periods(&ClassId::from("6A")), 5);
    assert_eq!(grid.class_periods(&ClassId::from("1M")), 6);
}

#[test]
fn test_short_day_has_no_late_variables() {
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_class("1M", 30)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 5));

    let (_, grid) = build(&problem);
    assert!(grid.item_var(0, slot(0, 4)).is_some());
    assert!(grid.item_var(0, slot(0, 5)).is_none());
    assert!(grid.class_slot_vars(&ClassId::from("6A"), slot(3, 5)).is_empty());
}

#[test]
fn test_duplicate_rows_share_variables() {
    let problem = TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 3))
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 2));

    let (_, grid) = build(&problem);
    assert_eq!(grid.items().len(), 1);
    assert_eq!(grid.items()[0].quantity, 5);
    assert_eq!(grid.lessons().len(), 25);
}

#[test]
fn test_item_day_slice_is_ordered_by_period() {
    let (_, grid) = build(&dense_two_classes());

    let index = grid
        .item_index(
            &ClassId::from("6B"),
            &TeacherId::from("Carla"),
            &SubjectId::from("Science"),
        )
        .unwrap();
    let wednesday = Day::new(2).unwrap();
    let lessons = grid.item_day_lessons(index, wednesday);

    assert_eq!(lessons.len(), 5);
    for (p, lesson) in lessons.iter().enumerate() {
        assert_eq!(lesson.key.day, wednesday);
        assert_eq!(lesson.key.period.index(), p);
        assert_eq!(lesson.key.class.as_str(), "6B");
        assert_eq!(lesson.item, index);
    }
    assert_eq!(
        grid.item_var(index, slot(2, 3)),
        Some(lessons[3].var)
    );
}

#[test]
fn test_cell_indices() {
    let (_, grid) = build(&dense_two_classes());

    // Three items per class compete for each class cell.
    assert_eq!(grid.class_slot_vars(&ClassId::from("6A"), slot(1, 1)).len(), 3);
    // Ana teaches Math to both classes.
    assert_eq!(grid.teacher_slot_vars(&TeacherId::from("Ana"), slot(4, 0)).len(), 2);
    assert!(grid.teacher_slot_vars(&TeacherId::from("Zed"), slot(0, 0)).is_empty());

    let teachers: Vec<&str> = grid.teachers().iter().map(|t| t.as_str()).collect();
    assert_eq!(teachers, vec!["Ana", "Bruno", "Carla"]);
}

#[test]
fn test_assigned_reads_true_variables() {
    let (model, grid) = build(&TimetableProblem::new()
        .with_class("6A", 25)
        .with_item(CurriculumItem::new("Ana", "Math", "6A", 2)));

    let mut values = vec![0; model.variables().len()];
    values[grid.item_var(0, slot(0, 1)).unwrap().index()] = 1;
    values[grid.item_var(0, slot(3, 4)).unwrap().index()] = 1;

    let keys: Vec<String> = grid.assigned(&values).map(|l| l.key.to_string()).collect();
    assert_eq!(keys, vec!["6A Mon P2: Math (Ana)", "6A Thu P5: Math (Ana)"]);
}
