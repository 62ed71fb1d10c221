// Tests for the output writer
//
// Output is captured through a shared in-memory buffer so each test can
// inspect exactly what would have reached stdout.

use super::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let output = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (output, buffer)
}

#[test]
fn test_human_messages_without_color() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output.info("Parsing NDC_PLUS_tables.txt").unwrap();
    output.success("✓ Wrote schema/ndc_plus_schema.json").unwrap();
    output.warning("3 lines skipped").unwrap();
    output.section("Tables").unwrap();

    assert_eq!(
        buffer.contents(),
        "INFO: Parsing NDC_PLUS_tables.txt\n\
         ✓ Wrote schema/ndc_plus_schema.json\n\
         WARNING: 3 lines skipped\n\
         \n\
         === Tables ===\n"
    );
}

#[test]
fn test_quiet_keeps_warnings() {
    let (mut output, buffer) = writer(OutputFormat::Human, true);
    output.info("hidden").unwrap();
    output.success("hidden").unwrap();
    output.warning("shown").unwrap();
    assert_eq!(buffer.contents(), "WARNING: shown\n");
}

#[test]
fn test_machine_formats_carry_only_data() {
    let (mut output, buffer) = writer(OutputFormat::Json, false);
    output.info("hidden").unwrap();
    output.warning("hidden").unwrap();
    output.table(&["Table"], vec![vec!["EVENT".to_string()]]).unwrap();
    output.data(&serde_json::json!({"tables": 2})).unwrap();
    assert_eq!(buffer.contents(), "{\"tables\":2}\n");
}

#[test]
fn test_yaml_data() {
    let (mut output, buffer) = writer(OutputFormat::Yaml, false);
    output.data(&serde_json::json!({"tables": 2})).unwrap();
    assert_eq!(buffer.contents(), "tables: 2\n");
}

#[test]
fn test_table_layout() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output
        .table(
            &["Table", "Columns"],
            vec![
                vec!["EVENT".to_string(), "3".to_string()],
                vec!["EVENT_HYPOTHESIS".to_string(), "4".to_string()],
            ],
        )
        .unwrap();

    assert_eq!(
        buffer.contents(),
        "Table            │ Columns\n\
         ─────────────────┼────────\n\
         EVENT            │ 3\n\
         EVENT_HYPOTHESIS │ 4\n"
    );
}

#[test]
fn test_no_spinner_for_custom_writer() {
    let (output, _) = writer(OutputFormat::Human, false);
    assert!(output.spinner("Parsing").is_none());
}

#[test]
fn test_human_data_is_readable_text() {
    let (mut output, buffer) = writer(OutputFormat::Human, false);
    output
        .data(&serde_json::json!({
            "tables": 2,
            "output": "schema/ndc_plus_schema.json",
            "ddl": null,
            "written": ["json", "markdown"],
            "counts": {"relationships": 4, "skipped": []}
        }))
        .unwrap();

    assert_eq!(
        buffer.contents(),
        "tables: 2\n\
         output: schema/ndc_plus_schema.json\n\
         ddl: -\n\
         written:\n  \
         - json\n  \
         - markdown\n\
         counts:\n  \
         relationships: 4\n  \
         skipped: (none)\n"
    );
}

#[test]
fn test_json_pretty_data_ends_with_one_newline() {
    let (mut output, buffer) = writer(OutputFormat::JsonPretty, false);
    output.data(&serde_json::json!({"tables": 2})).unwrap();
    assert_eq!(buffer.contents(), "{\n  \"tables\": 2\n}\n");
}
