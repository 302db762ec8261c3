//! Tests for the operation catalogue and JSON dispatch.

use super::*;
use crate::config::PromptConfig;
use crate::template::placeholders;
use crate::test_support::{TemplateFixture, shipped_composer};
use serde_json::{Value, json};

// =============================================================================
// Operation catalogue
// =============================================================================

#[test]
fn test_operation_names_are_distinct() {
    let mut keys: Vec<_> = Operation::ALL.iter().map(|op| op.key()).collect();
    let mut dirs: Vec<_> = Operation::ALL.iter().map(|op| op.dir()).collect();
    keys.sort();
    keys.dedup();
    dirs.sort();
    dirs.dedup();
    assert_eq!(keys.len(), 15);
    assert_eq!(dirs.len(), 15);
}

#[test]
fn test_operation_from_str() {
    assert_eq!("planTask".parse::<Operation>().unwrap(), Operation::PlanTask);
    assert_eq!(
        "GET_TASK_DETAIL".parse::<Operation>().unwrap(),
        Operation::GetTaskDetail
    );
    assert_eq!(
        "clear_all_tasks".parse::<Operation>().unwrap(),
        Operation::ClearAllTasks
    );

    let err = "planTasks".parse::<Operation>().unwrap_err();
    assert!(matches!(err, PromptError::InvalidInput(_)));
    assert!(err.to_string().contains("planTask"));
}

#[test]
fn test_operation_template_paths() {
    assert_eq!(Operation::ListTasks.to_string(), "listTasks");
    assert_eq!(
        Operation::ListTasks.template_path("notFound"),
        "listTasks/notFound.md"
    );
    for op in Operation::ALL {
        let paths = op.template_paths();
        assert_eq!(paths[0], format!("{}/index.md", op.dir()));
    }
}

#[test]
fn test_every_template_ships_in_english_set() {
    let composer = shipped_composer();
    for op in Operation::ALL {
        for path in op.template_paths() {
            let resolved = composer.resolver().resolve(&path).unwrap();
            assert!(!resolved.content.is_empty(), "{} is empty", path);
        }
    }
}

// =============================================================================
// JSON dispatch
// =============================================================================

#[test]
fn test_compose_json_dispatches() {
    let fixture = TemplateFixture::new();
    fixture.builtin("en", "completeTask/index.md", "{name} at {completionTime}");
    let composer = fixture.composer();

    let prompt = composer
        .compose_json(
            Operation::CompleteTask,
            json!({
                "task": {"id": "t1", "name": "Login"},
                "completionTime": "noon"
            }),
        )
        .unwrap();
    assert_eq!(prompt, "Login at noon");
}

#[test]
fn test_compose_json_missing_timestamps_render_empty() {
    let fixture = TemplateFixture::new();
    fixture
        .builtin("en", "queryTask/index.md", "{tasksContent}")
        .builtin("en", "queryTask/taskDetails.md", "CREATED=[{createdAt}]");
    let composer = fixture.composer();
    let params = json!({"query": "x", "tasks": [{"id": "a", "name": "A"}]});

    let first = composer
        .compose_json(Operation::QueryTask, params.clone())
        .unwrap();
    assert_eq!(first, "CREATED=[]");
    assert_eq!(composer.compose_json(Operation::QueryTask, params).unwrap(), first);
}

#[test]
fn test_compose_json_without_builtin_dir_uses_embedded_set() {
    let config = PromptConfig {
        builtin_dir: "/nonexistent/taskprompt/templates".into(),
        strict_placeholders: true,
        ..Default::default()
    };
    let prompt = PromptComposer::new(config)
        .compose_json(Operation::PlanTask, json!({"description": "Build auth"}))
        .unwrap();
    assert!(prompt.contains("Build auth"));
}

#[test]
fn test_compose_json_rejects_malformed_params() {
    let composer = shipped_composer();
    let err = composer
        .compose_json(Operation::VerifyTask, json!({"score": "high"}))
        .unwrap_err();

    assert!(matches!(err, PromptError::InvalidInput(_)));
    assert!(err.to_string().contains("verifyTask"));
}

#[test]
fn test_compose_json_missing_template_reports_candidates() {
    let fixture = TemplateFixture::new();
    let err = fixture
        .composer()
        .compose_json(Operation::InitProjectRules, json!({}))
        .unwrap_err();

    match err {
        PromptError::TemplateNotFound {
            template_path,
            checked,
            ..
        } => {
            assert_eq!(template_path, "initProjectRules/index.md");
            assert_eq!(checked.len(), 1);
        }
        other => panic!("expected TemplateNotFound, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_reports_unfilled_placeholder() {
    let fixture = TemplateFixture::new();
    fixture.builtin("en", "reflectTask/index.md", "{summary} {analysis} {confidence}");
    let mut config = fixture.config();
    config.strict_placeholders = true;

    let err = PromptComposer::new(config)
        .reflect_task(&ReflectTaskParams::default())
        .unwrap_err();
    match err {
        PromptError::UnresolvedPlaceholder { template, names } => {
            assert_eq!(template, "reflectTask/index.md");
            assert_eq!(names, vec!["confidence".to_string()]);
        }
        other => panic!("expected UnresolvedPlaceholder, got {:?}", other),
    }
}

#[test]
fn test_lenient_mode_leaves_unfilled_placeholder() {
    let fixture = TemplateFixture::new();
    fixture.builtin("en", "reflectTask/index.md", "{summary} {confidence}");

    let prompt = fixture
        .composer()
        .reflect_task(&ReflectTaskParams {
            summary: "s".to_string(),
            analysis: String::new(),
        })
        .unwrap();
    assert_eq!(prompt, "s {confidence}");
}

// =============================================================================
// Shipped templates
// =============================================================================

fn done(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{} description", name),
        "status": "completed",
        "summary": format!("{} finished", name),
        "createdAt": "2025-01-01T09:00:00Z",
        "updatedAt": "2025-01-02T09:00:00Z",
        "completedAt": "2025-01-03T12:00:00Z"
    })
}

fn detailed() -> Value {
    json!({
        "id": "t1",
        "name": "Login",
        "description": "Add a login form",
        "status": "in_progress",
        "notes": "Reuse the session store",
        "implementationGuide": "Add a handler",
        "verificationCriteria": "Form submits",
        "analysisResult": "Straightforward",
        "dependencies": [{"taskId": "t0"}],
        "relatedFiles": [
            {"path": "src/login.rs", "type": "TO_MODIFY", "description": "handler"},
            {"path": "docs/auth.md", "type": "REFERENCE"}
        ],
        "createdAt": "2025-01-01T09:00:00Z",
        "updatedAt": "2025-01-02T09:00:00Z"
    })
}

/// One input per branch of every operation.
fn branch_inputs() -> Vec<(Operation, Value)> {
    let many_done: Vec<Value> = (0..12).map(|i| done(&format!("d{}", i), "Old")).collect();
    vec![
        (
            Operation::PlanTask,
            json!({
                "description": "Build auth",
                "requirements": "No new crates",
                "existingTasksReference": true,
                "completedTasks": many_done,
                "pendingTasks": [detailed()],
                "memoryDir": "/tmp/memory"
            }),
        ),
        (Operation::PlanTask, json!({"description": "Build auth"})),
        (
            Operation::AnalyzeTask,
            json!({"summary": "s", "initialConcept": "c", "previousAnalysis": "p"}),
        ),
        (Operation::ReflectTask, json!({"summary": "s", "analysis": "a"})),
        (
            Operation::SplitTasks,
            json!({"updateMode": "append", "createdTasks": [detailed()], "allTasks": [done("t0", "Setup")]}),
        ),
        (Operation::ListTasks, json!({"status": "all", "tasks": []})),
        (
            Operation::ListTasks,
            json!({"status": "all", "tasks": [detailed(), done("t0", "Setup")]}),
        ),
        (
            Operation::ExecuteTask,
            json!({
                "task": detailed(),
                "complexityAssessment": {
                    "level": "VERY_HIGH",
                    "metrics": {"descriptionLength": 900, "dependenciesCount": 4},
                    "recommendations": ["Split it"]
                },
                "relatedFilesSummary": "src/login.rs",
                "dependencyTasks": [done("t0", "Setup")]
            }),
        ),
        (
            Operation::VerifyTask,
            json!({"task": detailed(), "score": 40, "summary": "Form broken"}),
        ),
        (
            Operation::VerifyTask,
            json!({"task": detailed(), "score": 90, "summary": "Works"}),
        ),
        (
            Operation::CompleteTask,
            json!({"task": detailed(), "completionTime": "2025-01-03 12:00:00 UTC"}),
        ),
        (Operation::QueryTask, json!({"query": "login", "tasks": []})),
        (
            Operation::QueryTask,
            json!({"query": "login", "tasks": [detailed()], "totalTasks": 1, "page": 1, "pageSize": 5, "totalPages": 1}),
        ),
        (Operation::GetTaskDetail, json!({"taskId": "t1", "error": "io"})),
        (Operation::GetTaskDetail, json!({"taskId": "t1"})),
        (Operation::GetTaskDetail, json!({"taskId": "t0", "task": done("t0", "Setup")})),
        (Operation::GetTaskDetail, json!({"taskId": "t1", "task": detailed()})),
        (Operation::DeleteTask, json!({"taskId": "t1"})),
        (
            Operation::DeleteTask,
            json!({"taskId": "t0", "task": done("t0", "Setup"), "isTaskCompleted": true}),
        ),
        (
            Operation::DeleteTask,
            json!({"taskId": "t1", "task": detailed(), "success": true, "message": "Deleted"}),
        ),
        (Operation::ClearAllTasks, json!({"confirm": false})),
        (Operation::ClearAllTasks, json!({"confirm": true, "isEmpty": true})),
        (
            Operation::ClearAllTasks,
            json!({"confirm": true, "success": true, "message": "Cleared", "backupFile": "backup.json"}),
        ),
        (Operation::UpdateTaskContent, json!({"taskId": "t1"})),
        (
            Operation::UpdateTaskContent,
            json!({"taskId": "t1", "task": detailed(), "validationError": "name is empty"}),
        ),
        (
            Operation::UpdateTaskContent,
            json!({"taskId": "t1", "task": detailed(), "emptyUpdate": true}),
        ),
        (
            Operation::UpdateTaskContent,
            json!({"taskId": "t1", "task": detailed(), "success": true, "message": "Updated", "updatedTask": detailed()}),
        ),
        (Operation::InitProjectRules, json!({})),
        (
            Operation::ProcessThought,
            json!({"thought": "t", "thoughtNumber": 1, "totalThoughts": 3, "nextThoughtNeeded": true, "stage": "Analysis", "tags": ["auth"]}),
        ),
        (
            Operation::ProcessThought,
            json!({"thought": "t", "thoughtNumber": 3, "totalThoughts": 3, "nextThoughtNeeded": false, "stage": "Conclusion"}),
        ),
    ]
}

#[test]
fn test_shipped_templates_fill_every_placeholder() {
    let config = PromptConfig {
        strict_placeholders: true,
        ..Default::default()
    };
    let composer = PromptComposer::new(config);

    for (op, input) in branch_inputs() {
        let prompt = composer
            .compose_json(op, input.clone())
            .unwrap_or_else(|e| panic!("{} with {} failed: {}", op, input, e));
        assert!(
            placeholders(&prompt).is_empty(),
            "{} left placeholders in:\n{}",
            op,
            prompt
        );
    }
}

#[test]
fn test_shipped_thought_chain_disabled() {
    let config = PromptConfig {
        enable_thought_chain: false,
        strict_placeholders: true,
        ..Default::default()
    };
    let prompt = PromptComposer::new(config)
        .compose_json(Operation::PlanTask, json!({"description": "Build auth"}))
        .unwrap();

    assert!(prompt.contains("Call `analyze_task`"));
    assert!(!prompt.contains("process_thought"));
}

#[test]
fn test_shipped_plan_caps_completed_tasks() {
    let many_done: Vec<Value> = (0..12).map(|i| done(&format!("d{}", i), "Old")).collect();
    let prompt = shipped_composer()
        .compose_json(
            Operation::PlanTask,
            json!({
                "description": "Build auth",
                "existingTasksReference": true,
                "completedTasks": many_done
            }),
        )
        .unwrap();

    assert!(prompt.contains("`d9`"));
    assert!(!prompt.contains("`d10`"));
    assert!(prompt.contains("2 more completed tasks not shown; showing 10 of 12"));
    assert!(prompt.contains("no pending tasks"));
}
