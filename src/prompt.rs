//! Instruction text sent to the generation service.

use crate::form::LessonPlanRequest;

/// Build the Indonesian instruction for `request`.
///
/// Every request field is embedded, per-session practices are listed as
/// `Pertemuan N: <practice>` in ascending session order.
pub fn build_prompt(request: &LessonPlanRequest) -> String {
    let sessions_info = request
        .sessions()
        .map(|(number, practice)| format!("    Pertemuan {}: {}", number, practice))
        .collect::<Vec<_>>()
        .join("\n");

    let dimensions = request
        .dimensions()
        .iter()
        .map(|d| d.label())
        .collect::<Vec<_>>()
        .join(", ");

    let level = request.level();

    format!(
        "Buatkan Perencanaan Pembelajaran Mendalam (RPM) Lengkap dalam Bahasa Indonesia.

DATA INPUT:
- Satuan Pendidikan: {school}
- Guru: {teacher} (NIP {teacher_nip})
- Kepala Sekolah: {principal} (NIP {principal_nip})
- Mata Pelajaran: {subject}
- Jenjang: {level}
- Kelas: {grade}
- CP: {outcomes}
- TP: {objectives}
- Materi Utama: {material}
- Jumlah Pertemuan: {count}
- Durasi per Pertemuan: {duration}
- Praktik Pedagogis per Pertemuan:
{sessions_info}
- Dimensi Lulusan: {dimensions}

INSTRUKSI KHUSUS:
1. Identifikasi Siswa: Harus generated otomatis menyesuaikan karakteristik psikososial jenjang {level}.
2. Lintas Disiplin: Generate kaitan materi ini dengan disiplin ilmu lain secara logis.
3. Topik: Buat judul topik yang relevan dan menggugah rasa ingin tahu.
4. Pengalaman Belajar (satu entri untuk setiap pertemuan, urut dari Pertemuan 1):
   - Memahami (Awal): Langkah berkesadaran/bermakna untuk memulai kelas.
   - Mengaplikasi (Inti): Harus SANGAT DETAIL mengikuti sintaks dari Praktik Pedagogis yang dipilih (misal: Sintaks PjBL jika dipilih PjBL).
   - Refleksi (Penutup): Langkah evaluasi diri yang menggembirakan/bermakna.
5. Setiap pertemuan harus memiliki 'tag' yang mendeskripsikan nuansanya (pilih salah satu: berkesadaran, bermakna, atau menggembirakan).
6. Digital: Berikan 2-3 tools online spesifik (misal: Kahoot, PhET, Google Earth, Canva).
",
        school = request.school_name,
        teacher = request.teacher_name,
        teacher_nip = request.teacher_nip,
        principal = request.principal_name,
        principal_nip = request.principal_nip,
        subject = request.subject,
        level = level,
        grade = request.grade(),
        outcomes = request.learning_outcomes,
        objectives = request.learning_objectives,
        material = request.material,
        count = request.sessions_count(),
        duration = request.duration_per_session,
        sessions_info = sessions_info,
        dimensions = dimensions,
    )
}
