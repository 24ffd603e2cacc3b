use pretty_assertions::assert_eq;

use super::*;

fn entry(message: &str) -> LogEntry {
    LogEntry {
        seq: 0,
        level: LogLevel::Info,
        ts_ms: None,
        source: LogSource::Session,
        message: message.to_string(),
    }
}

#[test]
fn append_assigns_increasing_sequence_numbers() {
    let mut logs = LogBuffer::new(8);
    logs.append(entry("first"));
    logs.append(entry("second"));

    let seqs: Vec<u64> = logs.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
}

#[test]
fn buffer_evicts_oldest_entries_at_capacity() {
    let mut logs = LogBuffer::new(2);
    logs.append(entry("one"));
    logs.append(entry("two"));
    logs.append(entry("three"));

    assert_eq!(logs.len(), 2);
    let messages: Vec<&str> = logs.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["two", "three"]);
    // Sequence numbers keep climbing past evictions.
    let seqs: Vec<u64> = logs.iter().map(|e| e.seq).collect();
    assert_eq!(seqs, vec![2, 3]);
}

#[test]
fn clear_resets_the_sequence() {
    let mut logs = LogBuffer::new(4);
    logs.append(entry("one"));
    logs.clear();
    assert!(logs.is_empty());

    logs.append(entry("after clear"));
    assert_eq!(logs.iter().next().map(|e| e.seq), Some(1));
}

#[test]
fn stamped_entries_carry_a_timestamp() {
    let entry = LogEntry::stamped(LogLevel::Warn, LogSource::Driver, "late".to_string());
    assert!(entry.ts_ms.is_some());
    assert_eq!(entry.level, LogLevel::Warn);
    assert_eq!(entry.source, LogSource::Driver);
}
