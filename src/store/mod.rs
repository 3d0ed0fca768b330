pub mod daftar_hadir;
pub mod dashboard;
pub mod kegiatan;
