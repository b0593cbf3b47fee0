use botdesk_logs::{
    ApplicationLogger, ApplicationRecord, AuditLogger, AuditRecord, Channel, Dispatch, Level, LogError, LoggerConfig,
    Loggers, MemorySink, Transport,
};
use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

fn memory_loggers(min_level: Level) -> (Loggers, MemorySink, MemorySink) {
    let application = MemorySink::new();
    let audit = MemorySink::new();
    let loggers = Loggers {
        application: ApplicationLogger::new(min_level).with_sink(application.clone()),
        audit: AuditLogger::new(Level::Silly).with_sink(audit.clone()),
    };
    (loggers, application, audit)
}

#[test]
fn test_application_record_round_trips_through_console_line() {
    let (loggers, application, _) = memory_loggers(Level::Silly);

    let input = json!({
        "level": "info",
        "message": "project exported",
        "userId": "u-42",
        "fileName": "projects.js",
        "methodName": "exportProject",
        "url": "/api/export",
        "callingArgs": { "projectId": "p1" },
        "status": 200,
    });
    assert_eq!(loggers.log_json(Channel::Application, input).unwrap(), Dispatch::Delivered { sinks: 1 });

    let lines = application.lines();
    assert_eq!(lines.len(), 1);
    let parsed: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(parsed["message"], "project exported");
    assert_eq!(parsed["callingArgs"]["projectId"], "p1");
    assert_eq!(parsed["status"], 200);
    assert!(parsed["timestamp"].is_string());
}

#[test]
fn test_schema_violation_produces_no_output_on_either_channel() {
    let (loggers, application, audit) = memory_loggers(Level::Silly);

    let err = loggers.log_json(Channel::Application, json!({ "message": "x", "foo": "y" })).unwrap_err();
    assert!(matches!(&err, LogError::SchemaViolation { channel: Channel::Application, key } if key == "foo"));
    assert_eq!(err.to_string(), "foo not allowed in application logs");

    let err = loggers.log_json(Channel::Audit, json!({ "label": "auth", "url": "/x" })).unwrap_err();
    assert!(err.is_schema_violation());

    assert!(application.is_empty());
    assert!(audit.is_empty());
}

#[test]
fn test_level_filtering_is_per_channel() {
    let (loggers, application, audit) = memory_loggers(Level::Warn);

    loggers.application.log(ApplicationRecord::new(Level::Info, "dropped")).unwrap();
    loggers.application.log(ApplicationRecord::new(Level::Error, "kept")).unwrap();
    loggers.audit.log(AuditRecord::new(Level::Silly, "sync", "kept too")).unwrap();

    assert_eq!(application.lines().len(), 1);
    assert!(application.lines()[0].contains("kept"));
    assert_eq!(audit.lines().len(), 1);
}

#[test]
fn test_audit_line_layout() {
    let (loggers, _, audit) = memory_loggers(Level::Silly);
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    loggers.audit.log(AuditRecord::new(Level::Info, "auth", "m").with_change("0", "1").at(at)).unwrap();
    loggers.audit.log(AuditRecord::new(Level::Info, "auth", "m").at(at)).unwrap();

    assert_eq!(
        audit.lines(),
        vec![
            "2024-01-02T03:04:05.000Z [AUTH] info: m before: 0 after: 1".to_string(),
            "2024-01-02T03:04:05.000Z [AUTH] info: m".to_string(),
        ]
    );
}

#[test]
fn test_dynamic_audit_record_with_status_zero() {
    let (loggers, _, audit) = memory_loggers(Level::Silly);

    let input = json!({
        "level": "warn",
        "label": "roles",
        "type": "deleted",
        "status": 0,
        "userId": "admin",
        "message": "role removed",
        "timestamp": "2024-05-06T07:08:09Z",
    });
    loggers.log_json(Channel::Audit, input).unwrap();

    assert_eq!(
        audit.lines(),
        vec!["2024-05-06T07:08:09.000Z [ROLES] warn: userId: admin deleted 0 role removed".to_string()]
    );
}

#[test]
fn test_collector_transport_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let toml = format!(
        "[logging]\ncollector_dir = {:?}\n\n[logging.audit]\ntransports = [\"stackdriver\"]\nlog_name = \"trail\"\n\n[logging.application]\ntransports = []\n",
        dir.path().display().to_string()
    );
    let config = LoggerConfig::from_toml_str(&toml).unwrap();
    assert_eq!(config.audit.transports, vec![Transport::Collector]);

    let loggers = Loggers::from_config(&config).unwrap();
    loggers.audit.log(AuditRecord::new(Level::Error, "auth", "locked").with_user_id("u-1")).unwrap();
    drop(loggers);

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().map(|e| e.unwrap().path()).collect();
    assert_eq!(entries.len(), 1);
    let content = std::fs::read_to_string(&entries[0]).unwrap();
    let parsed: Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(parsed["logName"], "trail");
    assert_eq!(parsed["severity"], "ERROR");
    assert!(parsed["message"].as_str().unwrap().contains("[AUTH] error: userId: u-1 locked"));
}
