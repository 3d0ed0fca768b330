use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;

/// Width of the `nama` column.
pub const NAMA_MAX_CHARS: usize = 128;

/// Daily work period. Stored and serialized with its Indonesian label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display,
    IntoStaticStr,
)]
pub enum Shift {
    #[serde(rename = "Pagi")]
    #[strum(serialize = "Pagi")]
    Morning,
    #[serde(rename = "Malam")]
    #[strum(serialize = "Malam")]
    Night,
}

/// Attendance outcome of one guard for one shift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, EnumString, Display,
    IntoStaticStr,
)]
pub enum Status {
    #[serde(rename = "Hadir")]
    #[strum(serialize = "Hadir")]
    Present,
    #[serde(rename = "Izin")]
    #[strum(serialize = "Izin")]
    Leave,
    #[serde(rename = "Sakit")]
    #[strum(serialize = "Sakit")]
    Sick,
    #[serde(rename = "Alpha")]
    #[strum(serialize = "Alpha")]
    Absent,
}

impl Shift {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl Status {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Row of `daftar_hadir`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct DaftarHadir {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub tanggal: NaiveDate,
    #[schema(example = "Pagi", value_type = String)]
    pub shift: String,
    #[schema(example = "Agus")]
    pub nama: String,
    #[schema(example = "Hadir", value_type = String)]
    pub status: String,
}

/// Check-in body as sent by the browser. Every field is optional here so a
/// missing one can be reported by name instead of as a decode failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateDaftarHadir {
    #[schema(example = "2024-03-01", format = "date")]
    pub tanggal: Option<String>,
    #[schema(example = "Pagi")]
    pub shift: Option<String>,
    #[schema(example = "Agus")]
    pub nama: Option<String>,
    #[schema(example = "Hadir")]
    pub status: Option<String>,
}

/// A validated check-in, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDaftarHadir {
    pub tanggal: NaiveDate,
    pub shift: Shift,
    pub nama: String,
    pub status: Status,
}

impl CreateDaftarHadir {
    pub fn validate(&self) -> Result<NewDaftarHadir, ApiError> {
        let tanggal = required(&self.tanggal, "Tanggal")?;
        let shift = required(&self.shift, "Shift")?;
        let nama = required(&self.nama, "Nama")?;
        let status = required(&self.status, "Status")?;

        Ok(NewDaftarHadir {
            tanggal: parse_tanggal(tanggal)?,
            shift: parse_shift(shift)?,
            nama: parse_nama(nama)?,
            status: parse_status(status)?,
        })
    }
}

/// Query string of `GET /daftar-hadir`.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DaftarHadirQuery {
    /// Filter by date (YYYY-MM-DD)
    #[schema(example = "2024-03-01")]
    pub tanggal: Option<String>,
    /// Filter by shift (Pagi or Malam)
    #[schema(example = "Pagi")]
    pub shift: Option<String>,
    /// Filter by guard name
    #[schema(example = "Agus")]
    pub nama: Option<String>,
}

/// Optional constraints for attendance lookups. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub tanggal: Option<NaiveDate>,
    pub shift: Option<Shift>,
    pub nama: Option<String>,
}

impl DaftarHadirQuery {
    pub fn to_filter(&self) -> Result<AttendanceFilter, ApiError> {
        Ok(AttendanceFilter {
            tanggal: present(&self.tanggal).map(parse_tanggal).transpose()?,
            shift: present(&self.shift).map(parse_shift).transpose()?,
            nama: present(&self.nama).map(parse_nama).transpose()?,
        })
    }
}

/// Trimmed value of an optional field, treating blank input as absent.
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ApiError> {
    present(value).ok_or_else(|| ApiError::Validation(format!("{field} wajib diisi!")))
}

pub fn parse_tanggal(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::Validation(format!("Tanggal tidak valid: {raw:?}, gunakan format YYYY-MM-DD"))
    })
}

pub fn parse_shift(raw: &str) -> Result<Shift, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Shift tidak valid: {raw:?}. Pilihan: Pagi, Malam")))
}

pub fn parse_nama(raw: &str) -> Result<String, ApiError> {
    if raw.chars().count() > NAMA_MAX_CHARS {
        return Err(ApiError::Validation(format!(
            "Nama terlalu panjang, maksimal {NAMA_MAX_CHARS} karakter"
        )));
    }
    Ok(raw.to_string())
}

pub fn parse_status(raw: &str) -> Result<Status, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::Validation(format!(
            "Status tidak valid: {raw:?}. Pilihan: Hadir, Izin, Sakit, Alpha"
        ))
    })
}
