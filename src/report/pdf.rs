use chrono::NaiveDate;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

use crate::model::daftar_hadir::Shift;
use crate::model::dashboard::MonthlyRecap;
use crate::model::kegiatan::LaporanResponse;
use crate::report::month::{ReportMonth, tanggal_label};

const INSTANSI: &str = "BPS Kabupaten Tuban";
const SIGNATURE: [&str; 2] = ["Mengetahui,", "Ketua Subbagian Umum"];
const SIGNATORY: &str = "Lulus Haryono, SST.";

const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 56.0;
const ROW_H: f32 = 18.0;
const CELL_PAD: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;

/// Paginated A4 document with the institutional letterhead on the first page.
pub struct PdfReport {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    regular_id: Ref,
    bold_id: Ref,
    next_id: i32,

    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,
    content: Content,
    y: f32,
}

#[derive(Clone, Copy)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn name(self) -> Name<'static> {
        match self {
            Font::Regular => Name(b"F1"),
            Font::Bold => Name(b"F2"),
        }
    }

    /// Rough Helvetica advance per character, as a fraction of the font size.
    fn avg_advance(self) -> f32 {
        match self {
            Font::Regular => 0.50,
            Font::Bold => 0.55,
        }
    }
}

pub struct Column<'a> {
    pub header: &'a str,
    pub width: f32,
}

impl PdfReport {
    pub fn new(title: &str) -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let regular_id = Ref::new(3);
        let bold_id = Ref::new(4);

        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        let mut report = Self {
            pdf,
            catalog_id,
            pages_id,
            regular_id,
            bold_id,
            next_id: 5,
            page_refs: Vec::new(),
            current_content_id: None,
            content: Content::new(),
            y: PAGE_H - MARGIN,
        };

        report.new_page();
        report.letterhead(title);
        report
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) {
        self.finalize_page();

        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
            .contents(content_id);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Font::Regular.name(), self.regular_id);
        fonts.pair(Font::Bold.name(), self.bold_id);
        drop(fonts);
        drop(resources);
        drop(page);

        self.current_content_id = Some(content_id);
        let number = format!("Halaman {}", self.page_refs.len());
        draw_text(&mut self.content, Font::Regular, 9.0, PAGE_W - MARGIN - 50.0, MARGIN / 2.0, &number);
        self.y = PAGE_H - MARGIN;
    }

    /// Writes the stream of the current page, leaving a fresh `Content` behind.
    fn finalize_page(&mut self) {
        if let Some(id) = self.current_content_id.take() {
            let done = std::mem::replace(&mut self.content, Content::new());
            self.pdf.stream(id, &done.finish());
        }
    }

    /// Starts a new page when fewer than `height` points remain.
    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.new_page();
        }
    }

    fn letterhead(&mut self, title: &str) {
        self.y -= 10.0;
        self.centered(Font::Bold, 18.0, title);
        self.y -= 8.0;
        self.centered(Font::Bold, 14.0, INSTANSI);
        self.y -= 10.0;

        let y = self.y;
        let content = &mut self.content;
        content.set_line_width(1.0);
        content.move_to(MARGIN, y);
        content.line_to(PAGE_W - MARGIN, y);
        content.stroke();
        self.y -= 24.0;
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    pub fn centered(&mut self, font: Font, size: f32, text: &str) {
        self.ensure_space(size + 6.0);
        self.y -= size;
        let width = text.chars().count() as f32 * size * font.avg_advance();
        let x = ((PAGE_W - width) / 2.0).max(MARGIN);
        let y = self.y;
        draw_text(&mut self.content, font, size, x, y, text);
        self.y -= 6.0;
    }

    pub fn line(&mut self, text: &str) {
        self.text_at(Font::Regular, 12.0, MARGIN, text);
    }

    pub fn section(&mut self, title: &str) {
        self.y -= 8.0;
        self.ensure_space(14.0 + 6.0 + 2.0 * ROW_H);
        self.text_at(Font::Bold, 14.0, MARGIN, title);
        self.y -= 4.0;
    }

    fn text_at(&mut self, font: Font, size: f32, x: f32, text: &str) {
        self.ensure_space(size + 6.0);
        self.y -= size;
        let y = self.y;
        draw_text(&mut self.content, font, size, x, y, text);
        self.y -= 6.0;
    }

    /// Grid table; the header row repeats on every page the table spans.
    /// Cell text is wrapped to the column width.
    pub fn table(&mut self, columns: &[Column], rows: &[Vec<String>]) {
        self.ensure_space(2.0 * ROW_H);
        self.table_header(columns);

        for row in rows {
            let wrapped: Vec<Vec<String>> = columns
                .iter()
                .zip(row)
                .map(|(col, cell)| wrap_cell(cell, col.width))
                .collect();
            let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);
            let height = ROW_H + (lines - 1) as f32 * (FONT_SIZE + 2.0);

            if self.y - height < MARGIN {
                self.new_page();
                self.table_header(columns);
            }

            let top = self.y;
            let content = &mut self.content;
            let mut x = MARGIN;
            for (col, cell_lines) in columns.iter().zip(&wrapped) {
                cell_border(content, x, top - height, col.width, height);
                for (i, text) in cell_lines.iter().enumerate() {
                    let baseline = top - CELL_PAD - FONT_SIZE + 2.0 - i as f32 * (FONT_SIZE + 2.0);
                    draw_text(content, Font::Regular, FONT_SIZE, x + CELL_PAD, baseline, text);
                }
                x += col.width;
            }
            self.y -= height;
        }
        self.y -= 12.0;
    }

    fn table_header(&mut self, columns: &[Column]) {
        let top = self.y;
        let total: f32 = columns.iter().map(|c| c.width).sum();
        let content = &mut self.content;

        content.save_state();
        content.set_fill_rgb(0.16, 0.50, 0.73);
        content.rect(MARGIN, top - ROW_H, total, ROW_H);
        content.fill_nonzero();
        content.restore_state();

        let mut x = MARGIN;
        for col in columns {
            cell_border(content, x, top - ROW_H, col.width, ROW_H);
            content.save_state();
            content.set_fill_rgb(1.0, 1.0, 1.0);
            draw_text(content, Font::Bold, FONT_SIZE, x + CELL_PAD, top - ROW_H + CELL_PAD, col.header);
            content.restore_state();
            x += col.width;
        }
        self.y -= ROW_H;
    }

    /// Right-hand signature block with room for a wet signature.
    pub fn signature(&mut self) {
        self.y -= 10.0;
        self.ensure_space(5.0 * 18.0);
        let x = PAGE_W - MARGIN - 160.0;
        for line in SIGNATURE {
            self.text_at(Font::Regular, 12.0, x, line);
        }
        self.y -= 48.0;
        self.text_at(Font::Bold, 12.0, x, SIGNATORY);
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.finalize_page();
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);
        self.pdf.finish()
    }
}

fn draw_text(content: &mut Content, font: Font, size: f32, x: f32, y: f32, text: &str) {
    let encoded = win_ansi(text);
    content.begin_text();
    content.set_font(font.name(), size);
    content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
    content.show(Str(&encoded));
    content.end_text();
}

fn cell_border(content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
    content.save_state();
    content.set_line_width(0.5);
    content.set_stroke_rgb(0.0, 0.0, 0.0);
    content.rect(x, y, w, h);
    content.stroke();
    content.restore_state();
}

/// Latin-1 maps onto WinAnsi for everything a roster needs; the rest becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match u32::from(c) {
            0x20..=0x7e | 0xa0..=0xff => c as u8,
            _ => b'?',
        })
        .collect()
}

fn wrap_cell(text: &str, width: f32) -> Vec<String> {
    let chars = ((width - 2.0 * CELL_PAD) / (FONT_SIZE * Font::Regular.avg_advance())).max(1.0) as usize;
    let lines: Vec<String> = textwrap::wrap(text, chars)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if lines.is_empty() { vec![String::new()] } else { lines }
}

/// Attendance roster plus activity log of one shift.
pub fn shift_report(tanggal: NaiveDate, shift: Shift, data: &LaporanResponse) -> Vec<u8> {
    let mut report = PdfReport::new("Laporan Kegiatan Satpam");
    report.line(&format!("Tanggal: {}", tanggal_label(tanggal)));
    report.line(&format!("Shift: {shift}"));

    if !data.attendance.is_empty() {
        report.section("Daftar Hadir");
        let rows: Vec<Vec<String>> = data
            .attendance
            .iter()
            .map(|a| vec![a.nama.clone(), a.status.clone()])
            .collect();
        report.table(
            &[
                Column { header: "Nama Satpam", width: 241.0 },
                Column { header: "Status Hadir", width: 242.0 },
            ],
            &rows,
        );
    }

    report.section("Kegiatan");
    let rows: Vec<Vec<String>> = data
        .kegiatan
        .iter()
        .map(|k| vec![k.jam.clone(), k.kegiatan.clone()])
        .collect();
    report.table(
        &[
            Column { header: "Jam", width: 70.0 },
            Column { header: "Deskripsi Kegiatan", width: 413.0 },
        ],
        &rows,
    );

    report.signature();
    report.finish()
}

pub fn monthly_recap_report(month: ReportMonth, recap: &[MonthlyRecap]) -> Vec<u8> {
    let mut report = PdfReport::new("Rekap Bulanan Kehadiran Satpam");
    report.centered(Font::Regular, 12.0, &format!("Bulan: {}", month.label()));

    let rows: Vec<Vec<String>> = recap
        .iter()
        .map(|r| {
            vec![
                r.nama.clone(),
                r.tally.hadir.to_string(),
                r.tally.izin.to_string(),
                r.tally.sakit.to_string(),
                r.tally.alpha.to_string(),
                r.shift_pagi.to_string(),
                r.shift_malam.to_string(),
            ]
        })
        .collect();
    report.table(
        &[
            Column { header: "Nama Satpam", width: 133.0 },
            Column { header: "Hadir", width: 55.0 },
            Column { header: "Izin", width: 55.0 },
            Column { header: "Sakit", width: 55.0 },
            Column { header: "Alpha", width: 55.0 },
            Column { header: "Shift Pagi", width: 65.0 },
            Column { header: "Shift Malam", width: 65.0 },
        ],
        &rows,
    );

    report.signature();
    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::daftar_hadir::DaftarHadir;
    use crate::model::dashboard::StatusTally;
    use crate::model::kegiatan::Kegiatan;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn tanggal() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn entry(n: u64, text: &str) -> Kegiatan {
        Kegiatan {
            id: n,
            tanggal: tanggal(),
            shift: "Pagi".into(),
            jam: format!("{:02}:00", n % 24),
            kegiatan: text.into(),
        }
    }

    #[test]
    fn shift_report_transcribes_roster_and_log() {
        let data = LaporanResponse {
            kegiatan: vec![entry(7, "Patroli area parkir")],
            attendance: vec![DaftarHadir {
                id: 1,
                tanggal: tanggal(),
                shift: "Pagi".into(),
                nama: "Agus".into(),
                status: "Hadir".into(),
            }],
        };
        let bytes = shift_report(tanggal(), Shift::Morning, &data);

        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, b"(Laporan Kegiatan Satpam)"));
        assert!(contains(&bytes, b"(Tanggal: 1 Maret 2024)"));
        assert!(contains(&bytes, b"(Shift: Pagi)"));
        assert!(contains(&bytes, b"(Agus)"));
        assert!(contains(&bytes, b"(Patroli area parkir)"));
        assert!(contains(&bytes, b"(Lulus Haryono, SST.)"));
    }

    #[test]
    fn empty_roster_skips_the_attendance_table() {
        let bytes = shift_report(tanggal(), Shift::Night, &LaporanResponse::default());
        assert!(!contains(&bytes, b"(Daftar Hadir)"));
        assert!(contains(&bytes, b"(Kegiatan)"));
    }

    #[test]
    fn long_logs_spill_onto_more_pages() {
        let mut report = PdfReport::new("Laporan Kegiatan Satpam");
        let rows: Vec<Vec<String>> = (0..120)
            .map(|n| vec![format!("{:02}:00", n % 24), format!("Catatan ke-{n}")])
            .collect();
        report.table(
            &[
                Column { header: "Jam", width: 70.0 },
                Column { header: "Deskripsi Kegiatan", width: 413.0 },
            ],
            &rows,
        );
        assert!(report.page_count() >= 3);
        assert!(report.finish().starts_with(b"%PDF-"));
    }

    #[test]
    fn monthly_recap_lists_each_guard() {
        let recap = vec![MonthlyRecap {
            nama: "Budi".into(),
            tally: StatusTally {
                hadir: 20,
                izin: 1,
                sakit: 0,
                alpha: 2,
            },
            shift_pagi: 12,
            shift_malam: 11,
        }];
        let month = ReportMonth::new(2024, 3).unwrap();
        let bytes = monthly_recap_report(month, &recap);
        assert!(contains(&bytes, b"(Bulan: Maret 2024)"));
        assert!(contains(&bytes, b"(Budi)"));
        assert!(contains(&bytes, b"(20)"));
        assert!(contains(&bytes, b"(Shift Malam)"));
    }

    #[test]
    fn non_latin_text_is_replaced() {
        assert_eq!(win_ansi("Café ✓"), b"Caf\xe9 ?".to_vec());
    }

    #[test]
    fn wrapping_keeps_words_inside_the_column() {
        let lines = wrap_cell("Patroli keliling gedung utama dan area parkir belakang", 70.0);
        assert!(lines.len() > 1);
        assert_eq!(wrap_cell("", 70.0), vec![String::new()]);
    }
}
