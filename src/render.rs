//! Document view: the five-section RPM layout plus signature block.
//!
//! Identity and curriculum rows come from the request, narrative rows from
//! the generated plan.

use crate::form::LessonPlanRequest;
use crate::plan::GeneratedLessonPlan;
use chrono::{Datelike, NaiveDate};
use html_escape::encode_text;
use std::fmt::Write;

pub const DOCUMENT_TITLE: &str = "PERENCANAAN PEMBELAJARAN MENDALAM (RPM)";
pub const SIGNING_CITY: &str = "Jakarta";
/// Semester printed next to the grade.
pub const SEMESTER: &str = "Ganjil";

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Long Indonesian date, e.g. `17 Agustus 2026`.
pub fn format_date_id(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

struct Section {
    heading: &'static str,
    rows: Vec<(&'static str, String)>,
}

struct SessionBlock {
    header: String,
    phases: [(&'static str, String); 3],
}

/// Layout shared by both renderers.
struct Document {
    school: String,
    sections_before: Vec<Section>,
    sessions: Vec<SessionBlock>,
    assessment: Section,
    signatures: Signatures,
}

struct Signatures {
    place_and_date: String,
    principal_title: String,
    principal_name: String,
    principal_nip: String,
    teacher_name: String,
    teacher_nip: String,
}

const EXPERIENCE_HEADING: &str = "IV. PENGALAMAN BELAJAR (Langkah Kegiatan)";

fn layout(plan: &GeneratedLessonPlan, request: &LessonPlanRequest, date: NaiveDate) -> Document {
    let dimensions = request
        .dimensions()
        .iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(", ");

    let identitas = Section {
        heading: "I. IDENTITAS",
        rows: vec![
            ("Satuan Pendidikan", request.school_name.clone()),
            ("Mata Pelajaran", request.subject.clone()),
            (
                "Kelas / Semester",
                format!("{} / {}", request.grade(), SEMESTER),
            ),
            ("Durasi Pertemuan", request.duration_per_session.clone()),
        ],
    };
    let identifikasi = Section {
        heading: "II. IDENTIFIKASI",
        rows: vec![
            ("Profil & Karakteristik Siswa", plan.identifikasi.siswa.clone()),
            ("Cakupan Materi Pembelajaran", request.material.clone()),
            ("Capaian Dimensi Lulusan", dimensions),
        ],
    };
    let desain = Section {
        heading: "III. DESAIN PEMBELAJARAN",
        rows: vec![
            ("Capaian Pembelajaran (CP)", request.learning_outcomes.clone()),
            ("Link Lintas Disiplin Ilmu", plan.desain.lintas_disiplin.clone()),
            ("Tujuan Pembelajaran (TP)", request.learning_objectives.clone()),
            ("Topik Utama Pembelajaran", plan.desain.topik.clone()),
            ("Pemanfaatan Tools Digital", plan.desain.digital.clone()),
            ("Lingkungan Belajar", plan.desain.lingkungan.clone()),
        ],
    };

    let sessions = plan
        .pengalaman
        .iter()
        .map(|s| SessionBlock {
            header: format!(
                "Pertemuan {}: {} ({})",
                s.session_number, s.pedagogical_practice, s.tag
            ),
            phases: [
                ("Memahami (Kegiatan Awal)", s.memahami.clone()),
                ("Mengaplikasi (Kegiatan Inti)", s.mengaplikasi.clone()),
                ("Refleksi (Kegiatan Penutup)", s.refleksi.clone()),
            ],
        })
        .collect();

    let assessment = Section {
        heading: "V. ASESMEN PEMBELAJARAN",
        rows: vec![
            ("Asesmen Awal (Diagnostik)", plan.asesmen.awal.clone()),
            ("Asesmen Proses (Formatif)", plan.asesmen.proses.clone()),
            ("Asesmen Akhir (Sumatif)", plan.asesmen.akhir.clone()),
        ],
    };

    Document {
        school: request.school_name.clone(),
        sections_before: vec![identitas, identifikasi, desain],
        sessions,
        assessment,
        signatures: Signatures {
            place_and_date: format!("{}, {}", SIGNING_CITY, format_date_id(date)),
            principal_title: format!("Kepala Sekolah {}", request.school_name),
            principal_name: request.principal_name.clone(),
            principal_nip: request.principal_nip.clone(),
            teacher_name: request.teacher_name.clone(),
            teacher_nip: request.teacher_nip.clone(),
        },
    }
}

fn html_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "<h2>{}</h2>", encode_text(section.heading));
    out.push_str("<table border=\"1\" cellpadding=\"6\" style=\"width:100%;border-collapse:collapse\">\n<tbody>\n");
    for (label, value) in &section.rows {
        let _ = writeln!(
            out,
            "<tr><td style=\"width:33%;font-weight:bold\">{}</td><td>{}</td></tr>",
            encode_text(label),
            encode_text(value)
        );
    }
    out.push_str("</tbody>\n</table>\n");
}

/// Render the document as standalone HTML, suitable for pasting into a
/// document editor.
pub fn render_html(plan: &GeneratedLessonPlan, request: &LessonPlanRequest, date: NaiveDate) -> String {
    let doc = layout(plan, request, date);
    let mut out = String::new();

    out.push_str("<div style=\"font-family:'Times New Roman', Times, serif\">\n");
    let _ = writeln!(
        out,
        "<h1 style=\"text-align:center\">{}</h1>\n<p style=\"text-align:center\">{}</p>",
        DOCUMENT_TITLE,
        encode_text(&doc.school)
    );

    for section in &doc.sections_before {
        html_section(&mut out, section);
    }

    let _ = writeln!(out, "<h2>{}</h2>", encode_text(EXPERIENCE_HEADING));
    out.push_str("<table border=\"1\" cellpadding=\"6\" style=\"width:100%;border-collapse:collapse\">\n");
    out.push_str("<thead><tr><th>No</th><th>Tahapan / Sintaks</th><th>Deskripsi Rencana Aktivitas</th></tr></thead>\n<tbody>\n");
    for session in &doc.sessions {
        let _ = writeln!(
            out,
            "<tr><td colspan=\"3\" style=\"font-weight:bold\">{}</td></tr>",
            encode_text(&session.header)
        );
        for (i, (phase, text)) in session.phases.iter().enumerate() {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                i + 1,
                encode_text(phase),
                encode_text(text)
            );
        }
    }
    out.push_str("</tbody>\n</table>\n");

    html_section(&mut out, &doc.assessment);

    let sig = &doc.signatures;
    out.push_str("<table style=\"width:100%;margin-top:48px\">\n<tr>\n");
    let _ = writeln!(
        out,
        "<td style=\"width:50%;text-align:center\"><p>Mengetahui,</p><p>{}</p><br><br><p><b><u>{}</u></b></p><p>NIP. {}</p></td>",
        encode_text(&sig.principal_title),
        encode_text(&sig.principal_name),
        encode_text(&sig.principal_nip)
    );
    let _ = writeln!(
        out,
        "<td style=\"width:50%;text-align:center\"><p>{}</p><p>Guru Mata Pelajaran</p><br><br><p><b><u>{}</u></b></p><p>NIP. {}</p></td>",
        encode_text(&sig.place_and_date),
        encode_text(&sig.teacher_name),
        encode_text(&sig.teacher_nip)
    );
    out.push_str("</tr>\n</table>\n</div>\n");
    out
}

fn text_section(out: &mut String, section: &Section) {
    let _ = writeln!(out, "\n{}", section.heading);
    for (label, value) in &section.rows {
        let _ = writeln!(out, "  {}: {}", label, value);
    }
}

/// Render the document as plain text.
pub fn render_text(plan: &GeneratedLessonPlan, request: &LessonPlanRequest, date: NaiveDate) -> String {
    let doc = layout(plan, request, date);
    let mut out = String::new();

    let _ = writeln!(out, "{}\n{}", DOCUMENT_TITLE, doc.school);
    for section in &doc.sections_before {
        text_section(&mut out, section);
    }

    let _ = writeln!(out, "\n{}", EXPERIENCE_HEADING);
    for session in &doc.sessions {
        let _ = writeln!(out, "  {}", session.header);
        for (i, (phase, text)) in session.phases.iter().enumerate() {
            let _ = writeln!(out, "    {}. {}: {}", i + 1, phase, text);
        }
    }

    text_section(&mut out, &doc.assessment);

    let sig = &doc.signatures;
    let _ = writeln!(
        out,
        "\nMengetahui,\n{}\n{}\nNIP. {}",
        sig.principal_title, sig.principal_name, sig.principal_nip
    );
    let _ = writeln!(
        out,
        "\n{}\nGuru Mata Pelajaran\n{}\nNIP. {}",
        sig.place_and_date, sig.teacher_name, sig.teacher_nip
    );
    out
}
