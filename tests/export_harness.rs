//! CSV export integration harness.
//!
//! # What this covers
//!
//! - **Contacts, active filter**: only the rows the query keeps are written,
//!   under a header naming the table's columns; addresses containing commas
//!   read back intact.
//! - **Contacts, display order**: a reversed name sort is the order rows land
//!   in the file.
//! - **Empty filter**: a query that matches nothing writes a header-only file.
//! - **Calendar**: every event is written as `title,start,end,allDay,category`.
//! - **Empty calendar**: header only.
//! - **`:export` command**: default file name per view, explicit path, and a
//!   missing directory reported in the command bar rather than a panic.
//!
//! # Running
//!
//! ```sh
//! cargo test --test export_harness
//! ```

mod common;

use atrium_core::calendar::Calendar;
use atrium_core::config::Config;
use atrium_data::Dataset;
use atrium_tui::event::AppEvent;
use atrium_tui::widgets::calendar::CalendarState;
use atrium_tui::{AppState, InvoiceSource, Theme, View};
use pretty_assertions::assert_eq;
use std::path::Path;

const CONTACT_HEADER: [&str; 9] = [
    "id",
    "registrar_id",
    "name",
    "age",
    "phone",
    "email",
    "address",
    "city",
    "zip_code",
];

fn offline() -> AppState {
    AppState::new(
        Config::defaults(),
        Theme::load_dark(),
        InvoiceSource::Static(Dataset::Invoices.records()),
    )
}

fn search(s: &mut AppState, query: &str) {
    s.handle(AppEvent::QueryFocus);
    for c in query.chars() {
        s.handle(AppEvent::Char(c));
    }
    s.handle(AppEvent::Escape);
}

fn run_command(s: &mut AppState, cmd: &str) {
    s.handle(AppEvent::Char(':'));
    for c in cmd.chars() {
        s.handle(AppEvent::Char(c));
    }
    s.handle(AppEvent::Enter);
}

/// Header and data rows of a CSV file.
fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (header, rows)
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[test]
fn contacts_export_keeps_only_filtered_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.csv");
    let mut s = offline();
    s.switch_view(View::Contacts);
    search(&mut s, "lannister");

    assert_eq!(s.export(&path).unwrap(), 2);
    let (header, rows) = read_csv(&path);
    assert_eq!(header, CONTACT_HEADER);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][2], "Cersei Lannister");
    assert_eq!(rows[0][6], "1234 Main Street, New York, NY 10001");
    assert_eq!(rows[1][2], "Jaime Lannister");
}

#[test]
fn contacts_export_follows_sort_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.csv");
    let mut s = offline();
    s.switch_view(View::Contacts);
    search(&mut s, "lannister");
    // id, registrar_id, then name; reversed
    for key in ['s', 's', 's', 'S'] {
        s.handle(AppEvent::Char(key));
    }

    s.export(&path).unwrap();
    let (_, rows) = read_csv(&path);
    let names: Vec<&str> = rows.iter().map(|r| r[2].as_str()).collect();
    assert_eq!(names, ["Jaime Lannister", "Cersei Lannister"]);
}

#[test]
fn empty_filter_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.csv");
    let mut s = offline();
    s.switch_view(View::Contacts);
    search(&mut s, "no such contact");
    assert_eq!(s.contacts.list.len(), 0);

    assert_eq!(s.export(&path).unwrap(), 0);
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, format!("{}\n", CONTACT_HEADER.join(",")));
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[test]
fn calendar_export_writes_every_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar_events.csv");
    let mut s = offline();
    s.switch_view(View::Calendar);

    assert_eq!(s.export(&path).unwrap(), 2);
    let (header, rows) = read_csv(&path);
    assert_eq!(header, ["title", "start", "end", "allDay", "category"]);
    assert_eq!(
        rows,
        vec![
            vec!["All-day Meeting", "2022-09-14", "", "true", "Meeting"],
            vec!["Task Review", "2022-09-28", "", "true", "Task"],
        ]
    );
}

#[test]
fn empty_calendar_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar_events.csv");
    let state = CalendarState::new(Calendar::new(Vec::new()));

    assert_eq!(state.export(&path).unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "title,start,end,allDay,category\n"
    );
}

// ---------------------------------------------------------------------------
// :export command
// ---------------------------------------------------------------------------

#[test]
fn export_command_with_explicit_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.csv");
    let mut s = offline();
    s.switch_view(View::Calendar);

    run_command(&mut s, &format!("export {}", path.display()));
    assert_eq!(s.command_bar.error, None);
    assert_eq!(
        s.notice,
        Some(format!("exported 2 rows to {}", path.display()))
    );
    assert_eq!(read_csv(&path).1.len(), 2);
}

#[test]
fn default_file_names_per_view() {
    assert_eq!(View::Contacts.export_file(), Some("contacts.csv"));
    assert_eq!(View::Calendar.export_file(), Some("calendar_events.csv"));
    assert_eq!(View::Team.export_file(), Some("team.csv"));
    assert_eq!(View::Invoices.export_file(), Some("invoices.csv"));
    assert_eq!(View::Faq.export_file(), None);
    assert_eq!(View::Profile.export_file(), None);
}

#[test]
fn missing_directory_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent").join("contacts.csv");
    let mut s = offline();
    s.switch_view(View::Contacts);
    search(&mut s, "no such contact");

    run_command(&mut s, &format!("export {}", path.display()));
    let err = s.command_bar.error.clone().unwrap();
    assert!(err.starts_with("cannot create"), "{err}");
    assert_eq!(s.notice, None);
    assert!(!path.exists());
}
