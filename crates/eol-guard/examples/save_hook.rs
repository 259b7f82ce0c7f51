//! Save hook example
//!
//! Demonstrates wiring a `SaveInterceptor` into a `DocumentTable` and saving a document with
//! mixed line endings.

use eol_guard::{
    Breakpoint, DocumentTable, LineEndingStats, NormalizeOptions, Position, SaveInterceptor,
};

fn main() {
    println!("=== eol-guard save hook ===\n");

    let mut table = DocumentTable::new();
    table.advise(SaveInterceptor::new(NormalizeOptions::default()));

    let text = "fn main() {\r\n    let x = 1;\n    println!(\"{x}\");\r\n}\n";
    let doc = table
        .open(Some("src/main.rs".to_string()), text)
        .expect("moniker is unique");
    table.set_caret(doc, Position::new(2, 8)).unwrap();
    table.add_breakpoint(doc, Breakpoint::at(2, 4)).unwrap();

    print_stats("before", text);

    let persisted = table.save(doc).unwrap();
    print_stats("after", &persisted);

    println!("\ncaret:       {:?}", table.caret(doc).unwrap());
    println!("breakpoints: {:?}", table.breakpoints(doc).unwrap());
}

fn print_stats(label: &str, text: &str) {
    let stats = LineEndingStats::scan(text);
    println!(
        "{label:>6}: CRLF={} LF={} CR={} mixed={}",
        stats.crlf,
        stats.lf,
        stats.cr,
        stats.is_mixed()
    );
}
