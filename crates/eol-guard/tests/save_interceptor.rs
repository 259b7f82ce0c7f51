use eol_guard::{
    Breakpoint, DocumentTable, EventStatus, GuardConfig, HitCountKind, NormalizeOptions,
    Position, SaveInterceptor, ScrollInfo, ScrollState,
};
use pretty_assertions::assert_eq;

fn table_with_interceptor(options: NormalizeOptions) -> DocumentTable {
    let mut table = DocumentTable::new();
    table.advise(SaveInterceptor::new(options));
    table
}

fn scrolled(first_visible: i32) -> ScrollState {
    ScrollState {
        horizontal: ScrollInfo {
            min_unit: 0,
            max_unit: 120,
            visible_units: 80,
            first_visible: 4,
        },
        vertical: ScrollInfo {
            min_unit: 0,
            max_unit: 300,
            visible_units: 40,
            first_visible,
        },
    }
}

#[test]
fn test_save_normalizes_and_preserves_view_state() {
    let mut table = table_with_interceptor(NormalizeOptions::default());
    let doc = table
        .open(Some("/src/main.rs".to_string()), "fn main() {\r\n    run();\n}\n")
        .unwrap();
    table.set_caret(doc, Position::new(1, 4)).unwrap();
    table.set_scroll(doc, scrolled(2)).unwrap();
    let breakpoint = Breakpoint {
        function_name: "main".to_string(),
        condition: "count > 3".to_string(),
        language: "Rust".to_string(),
        hit_count: 2,
        hit_count_kind: HitCountKind::Equal,
        ..Breakpoint::at(1, 4)
    };
    table.add_breakpoint(doc, breakpoint.clone()).unwrap();

    let persisted = table.save(doc).unwrap();

    assert_eq!(persisted, "fn main() {\r\n    run();\r\n}\r\n");
    assert_eq!(table.text(doc).unwrap(), persisted);
    assert_eq!(table.caret(doc).unwrap(), Some(Position::new(1, 4)));
    assert_eq!(table.scroll(doc).unwrap(), Some(scrolled(2)));
    assert_eq!(table.breakpoints(doc).unwrap(), &[breakpoint]);
    assert!(!table.is_dirty(doc).unwrap());
}

#[test]
fn test_unchanged_document_is_not_rewritten() {
    let mut table = table_with_interceptor(NormalizeOptions::default());
    let doc = table.open(None, "a\nb\n").unwrap();
    table.save(doc).unwrap();
    assert_eq!(table.version(doc).unwrap(), 0);
}

#[test]
fn test_document_without_view_is_saved_as_is() {
    let mut table = table_with_interceptor(NormalizeOptions::default());
    let doc = table.open(None, "a\r\nb\n").unwrap();
    table.close_view(doc).unwrap();
    assert_eq!(table.save(doc).unwrap(), "a\r\nb\n");
}

#[test]
fn test_read_only_document_is_saved_as_is() {
    let mut table = table_with_interceptor(NormalizeOptions::default());
    let doc = table.open(None, "a\r\nb\n").unwrap();
    table.set_read_only(doc, true).unwrap();
    assert_eq!(table.save(doc).unwrap(), "a\r\nb\n");
}

#[test]
fn test_trim_moves_caret_back_inside_shortened_line() {
    let config = GuardConfig {
        trim_trailing_whitespace: true,
    };
    let mut table = table_with_interceptor(config.normalize_options());
    let doc = table.open(None, "let x = 1;    \nlet y = 2;").unwrap();
    table.set_caret(doc, Position::new(0, 14)).unwrap();

    assert_eq!(table.save(doc).unwrap(), "let x = 1;\nlet y = 2;\n");
    assert_eq!(table.caret(doc).unwrap(), Some(Position::new(0, 10)));
}

#[test]
fn test_interceptor_ignores_unknown_documents() {
    let mut table = DocumentTable::new();
    let doc = table.open(None, "a\r\nb\n").unwrap();
    table.close(doc).unwrap();

    let status = SaveInterceptor::default().before_save(&mut table, doc);
    assert_eq!(status, EventStatus::Proceed);
}
