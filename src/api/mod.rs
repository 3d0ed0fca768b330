pub mod daftar_hadir;
pub mod laporan;
