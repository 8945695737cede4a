//! Integration tests for the rendered document

use chrono::NaiveDate;
use rpmgen::adapter::parse_response;
use rpmgen::catalog::PedagogicalPractice;
use rpmgen::form::FormField;
use rpmgen::render::{render_html, render_text};

use super::test_utils::{complete_request, plan_json};

#[test]
fn test_html_document_layout() {
    let plan = parse_response(&plan_json(2, "Perjalanan <setetes> air").to_string()).unwrap();
    let mut request = complete_request();
    request.set_field(FormField::SessionsCount, "2").unwrap();
    request
        .set_session_practice(2, PedagogicalPractice::PjBL)
        .unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

    let html = render_html(&plan, &request, date);
    assert!(html.contains("PERENCANAAN PEMBELAJARAN MENDALAM (RPM)"));
    assert!(html.contains("Perjalanan &lt;setetes&gt; air"));
    assert!(html.contains("Kelas 4 / Ganjil"));
    assert!(html.contains("Pertemuan 1: Inkuiri-Discovery (bermakna)"));
    assert!(html.contains("Pertemuan 2: Inkuiri-Discovery (bermakna)"));
    assert!(html.contains("Jakarta, 9 Maret 2026"));
    assert!(html.contains("Kepala Sekolah SD Negeri 1"));
    assert!(html.contains("NIP. 198701012010012001"));

    let i = html.find("I. IDENTITAS").unwrap();
    let v = html.find("V. ASESMEN PEMBELAJARAN").unwrap();
    assert!(i < v);
}

#[test]
fn test_text_document_uses_request_curriculum_fields() {
    let plan = parse_response(&plan_json(1, "Topik").to_string()).unwrap();
    let request = complete_request();
    let date = NaiveDate::from_ymd_opt(2026, 10, 31).unwrap();

    let text = render_text(&plan, &request, date);
    assert!(text.contains("Capaian Pembelajaran (CP): Peserta didik memahami siklus air"));
    assert!(text.contains("Tujuan Pembelajaran (TP): Menjelaskan tahapan siklus air"));
    assert!(text.contains("Capaian Dimensi Lulusan: Penalaran Kritis"));
    assert!(text.contains("Jakarta, 31 Oktober 2026"));
}
