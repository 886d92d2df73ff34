use fitfreak::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const STANDING: &str = r#"(keypoints: [
    (name: "left_hip", x: 0.4, y: 0.5, score: 0.9),
    (name: "left_knee", x: 0.4, y: 0.7, score: 0.9),
    (name: "left_ankle", x: 0.4, y: 0.9, score: 0.9),
    (name: "right_hip", x: 0.6, y: 0.5, score: 0.9),
    (name: "right_knee", x: 0.6, y: 0.7, score: 0.9),
    (name: "right_ankle", x: 0.6, y: 0.9, score: 0.9),
])"#;

// knees at about 76 degrees
const SQUATTING: &str = r#"(keypoints: [
    (name: "left_hip", x: 0.2, y: 0.75, score: 0.9),
    (name: "left_knee", x: 0.4, y: 0.7, score: 0.9),
    (name: "left_ankle", x: 0.4, y: 0.9, score: 0.9),
    (name: "right_hip", x: 0.8, y: 0.75, score: 0.9),
    (name: "right_knee", x: 0.6, y: 0.7, score: 0.9),
    (name: "right_ankle", x: 0.6, y: 0.9, score: 0.9),
])"#;

// squatting, but the ankles are barely seen
const BLURRY: &str = r#"(keypoints: [
    (name: "left_hip", x: 0.2, y: 0.75, score: 0.9),
    (name: "left_knee", x: 0.4, y: 0.7, score: 0.9),
    (name: "left_ankle", x: 0.4, y: 0.9, score: 0.1),
    (name: "right_hip", x: 0.8, y: 0.75, score: 0.9),
    (name: "right_knee", x: 0.6, y: 0.7, score: 0.9),
    (name: "right_ankle", x: 0.6, y: 0.9, score: 0.1),
    (name: "left_heel", x: 0.4, y: 0.95, score: 0.9),
])"#;

fn write_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn pose_log(frames: &[&str]) -> NamedTempFile {
    write_file(&format!("[{}]", frames.join(",\n")))
}

#[test]
fn replay_squats_from_files() {
    let config = write_file("(exercise: \"Squats\", min_confidence: 0.3)");
    let log = pose_log(&[
        STANDING, SQUATTING, STANDING, BLURRY, STANDING, "()", SQUATTING, STANDING,
    ]);

    let mut session = Session::new(read_configuration(config.path()).unwrap());
    let mut source = PoseLog::from_file(log.path()).unwrap();
    let mut counts = Vec::new();
    let frames = session
        .run(&mut source, |feedback| match feedback {
            Feedback::Reps(reps) => counts.push(reps.count),
            Feedback::Verdict(_) => panic!("squats are counted"),
        })
        .unwrap();

    assert_eq!(frames, 8);
    assert_eq!(counts, vec![0, 0, 1, 1, 1, 1, 1, 2]);
    assert_eq!(session.count(ExerciseKind::Squats), 2);
    assert_eq!(session.status(), "Squats: 2 (up)");
}

#[test]
fn blurry_frames_count_without_a_confidence_floor() {
    let mut source =
        PoseLog::from_ron(&format!("[{}]", [STANDING, BLURRY, STANDING].join(","))).unwrap();
    let mut session = Session::new(SessionConfig {
        exercise: Some(ExerciseKind::Squats),
        ..Default::default()
    });
    session.run(&mut source, |_| {}).unwrap();
    assert_eq!(session.count(ExerciseKind::Squats), 1);
}

#[test]
fn replay_tree_pose() {
    let log = pose_log(&[STANDING, "()"]);
    let mut session = Session::default();
    session.select_by_name("tree pose").unwrap();
    let mut verdicts = Vec::new();
    session
        .run(&mut PoseLog::from_file(log.path()).unwrap(), |feedback| {
            if let Feedback::Verdict(verdict) = feedback {
                verdicts.push(verdict.clone());
            }
        })
        .unwrap();

    assert_eq!(verdicts.len(), 2);
    // both legs straight: the raised leg is not raised
    assert!(!verdicts[0].is_valid);
    assert_eq!(
        verdicts[0].corrections,
        vec!["Position your raised foot against your inner thigh or calf"]
    );
    assert_eq!(verdicts[1].message, "No pose detected");
}

#[test]
fn malformed_log_is_an_error() {
    let duplicated = pose_log(&[r#"(keypoints: [
        (name: "nose", x: 0.5, y: 0.1),
        (name: "nose", x: 0.5, y: 0.2),
    ])"#]);
    let err = PoseLog::from_file(duplicated.path()).unwrap_err();
    assert_eq!(err.message(), "Malformed pose log");
    assert!(err.cause().unwrap().contains("nose"));

    let err = PoseLog::from_file(&duplicated.path().with_extension("missing")).unwrap_err();
    assert!(err.message().starts_with("Failed to read pose log"));
}
