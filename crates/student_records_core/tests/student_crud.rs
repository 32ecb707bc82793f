use std::fs;
use std::path::PathBuf;

use student_records_core::{
    CsvFileStorage, Field, RepoError, StorageStudentRepository, Student, StudentPatch,
    StudentRepository, StudentService, UpdateReport,
};
use tempfile::TempDir;

fn csv_repo() -> (TempDir, PathBuf, StorageStudentRepository<CsvFileStorage>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.csv");
    let repo = StorageStudentRepository::new(CsvFileStorage::new(&path));
    (dir, path, repo)
}

fn ann() -> Student {
    Student::new("1", "Ann Lee", "20", "ann@example.com", "1234567890")
}

fn student(roll: &str, name: &str) -> Student {
    Student::new(roll, name, "21", "someone@example.com", "12345678901")
}

fn with_roll(mut student: Student, roll: &str) -> Student {
    student.roll_no = roll.to_string();
    student
}

#[test]
fn register_find_update_delete_scenario() {
    let (_dir, _path, repo) = csv_repo();

    repo.register(&ann()).unwrap();
    assert_eq!(repo.find_by_roll("1").unwrap(), Some(ann()));

    let report = repo
        .update_by_roll("1", &StudentPatch::default().with(Field::Age, "21"))
        .unwrap();
    assert_eq!(report.applied, vec![Field::Age]);

    let mut expected = ann();
    expected.age = "21".to_string();
    assert_eq!(repo.find_by_roll("1").unwrap(), Some(expected));

    repo.delete_by_roll("1").unwrap();
    assert_eq!(repo.find_by_roll("1").unwrap(), None);
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn list_all_on_missing_file_is_empty() {
    let (_dir, path, repo) = csv_repo();

    assert!(repo.list_all().unwrap().is_empty());
    assert_eq!(repo.find_by_roll("1").unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn register_rejects_duplicate_roll_and_keeps_size() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&ann()).unwrap();

    let err = repo.register(&student("1", "Other")).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateRollNo(roll) if roll == "1"));
    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn register_rejects_invalid_record_without_writing() {
    let (_dir, path, repo) = csv_repo();

    let mut bad = ann();
    bad.age = "200".to_string();
    let err = repo.register(&bad).unwrap_err();

    assert!(matches!(err, RepoError::Validation(ref e) if e.field == Field::Age));
    assert!(!path.exists());
}

#[test]
fn register_appends_in_insertion_order() {
    let (_dir, _path, repo) = csv_repo();
    for (roll, name) in [("3", "C"), ("1", "A"), ("2", "B")] {
        repo.register(&student(roll, name)).unwrap();
    }

    let rolls: Vec<String> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|s| s.roll_no)
        .collect();
    assert_eq!(rolls, ["3", "1", "2"]);
}

#[test]
fn update_single_field_preserves_others_and_count() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&student("1", "A")).unwrap();
    repo.register(&with_roll(ann(), "2")).unwrap();
    repo.register(&student("3", "C")).unwrap();

    repo.update_by_roll("2", &StudentPatch::default().with(Field::Email, "new@example.org"))
        .unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0], student("1", "A"));
    assert_eq!(all[2], student("3", "C"));
    assert_eq!(
        all[1],
        Student::new("2", "Ann Lee", "20", "new@example.org", "1234567890")
    );
}

#[test]
fn update_keeps_existing_value_for_invalid_fields() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&ann()).unwrap();

    let patch = StudentPatch::default()
        .with(Field::FullName, "Ann B. Lee")
        .with(Field::Age, "3")
        .with(Field::Phone, "   ");
    let report = repo.update_by_roll("1", &patch).unwrap();

    assert_eq!(
        report,
        UpdateReport {
            applied: vec![Field::FullName],
            rejected: vec![Field::Age],
        }
    );
    let stored = repo.find_by_roll("1").unwrap().unwrap();
    assert_eq!(stored.full_name, "Ann B. Lee");
    assert_eq!(stored.age, "20");
    assert_eq!(stored.phone, "1234567890");
}

#[test]
fn update_rejects_roll_change_onto_another_record() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&student("1", "A")).unwrap();
    repo.register(&student("2", "B")).unwrap();

    let report = repo
        .update_by_roll("2", &StudentPatch::default().with(Field::RollNo, "1"))
        .unwrap();
    assert_eq!(report.rejected, vec![Field::RollNo]);

    let report = repo
        .update_by_roll("2", &StudentPatch::default().with(Field::RollNo, "9"))
        .unwrap();
    assert_eq!(report.applied, vec![Field::RollNo]);
    assert!(repo.find_by_roll("9").unwrap().is_some());
    assert!(repo.find_by_roll("2").unwrap().is_none());
}

#[test]
fn update_missing_roll_leaves_file_byte_for_byte() {
    let (_dir, path, repo) = csv_repo();
    repo.register(&ann()).unwrap();
    let before = fs::read(&path).unwrap();

    let err = repo
        .update_by_roll("404", &StudentPatch::default().with(Field::Age, "30"))
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound(roll) if roll == "404"));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn update_on_missing_file_is_not_found_and_creates_nothing() {
    let (_dir, path, repo) = csv_repo();

    let err = repo
        .update_by_roll("1", &StudentPatch::default().with(Field::Age, "30"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert!(!path.exists());
}

#[test]
fn delete_removes_one_record_and_keeps_order() {
    let (_dir, _path, repo) = csv_repo();
    for roll in ["1", "2", "3", "4"] {
        repo.register(&student(roll, "X")).unwrap();
    }

    repo.delete_by_roll(" 2 ").unwrap();

    let rolls: Vec<String> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|s| s.roll_no)
        .collect();
    assert_eq!(rolls, ["1", "3", "4"]);
}

#[test]
fn delete_missing_roll_leaves_file_byte_for_byte() {
    let (_dir, path, repo) = csv_repo();
    repo.register(&ann()).unwrap();
    let before = fs::read(&path).unwrap();

    let err = repo.delete_by_roll("2").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn stored_roll_with_whitespace_still_matches() {
    let (_dir, path, repo) = csv_repo();
    fs::write(
        &path,
        "RollNo,FullName,Age,Email,Phone\n 5 ,Eve,40,eve@example.com,1234567890\n",
    )
    .unwrap();

    assert_eq!(repo.find_by_roll("5").unwrap().unwrap().full_name, "Eve");
    assert!(matches!(
        repo.check_field_input(Field::RollNo, "5"),
        Err(RepoError::DuplicateRollNo(_))
    ));
    repo.delete_by_roll("5").unwrap();
    assert!(repo.list_all().unwrap().is_empty());
}

#[test]
fn list_all_is_idempotent_without_writes() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&ann()).unwrap();
    repo.register(&student("2", "B")).unwrap();

    assert_eq!(repo.list_all().unwrap(), repo.list_all().unwrap());
}

#[test]
fn check_field_input_validates_and_detects_duplicates() {
    let (_dir, _path, repo) = csv_repo();
    repo.register(&ann()).unwrap();

    assert!(repo.check_field_input(Field::RollNo, "2").is_ok());
    assert!(matches!(
        repo.check_field_input(Field::RollNo, "1"),
        Err(RepoError::DuplicateRollNo(_))
    ));
    assert!(matches!(
        repo.check_field_input(Field::Age, "101"),
        Err(RepoError::Validation(_))
    ));
    assert!(repo.check_field_input(Field::FullName, "1").is_ok());
}

#[test]
fn service_accepts_raw_field_mappings() {
    let (_dir, _path, repo) = csv_repo();
    let service = StudentService::new(repo);

    let created = service
        .register_fields([
            ("RollNo", " 1 "),
            ("FullName", "Ann Lee"),
            ("Age", "20"),
            ("Email", "ann@example.com"),
            ("Phone", "1234567890"),
        ])
        .unwrap();
    assert_eq!(created, ann());

    let report = service
        .update_fields("1", [("Age", Some("22")), ("Email", None), ("Unknown", Some("x"))])
        .unwrap();
    assert_eq!(report.applied, vec![Field::Age]);
    assert_eq!(service.find_by_roll("1").unwrap().unwrap().age, "22");

    let err = service
        .register_fields([("RollNo", "2"), ("FullName", "No Age")])
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref e) if e.field == Field::Age));
}
