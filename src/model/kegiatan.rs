use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::daftar_hadir::{
    AttendanceFilter, DaftarHadir, Shift, parse_shift, parse_tanggal, present, required,
};
use crate::error::ApiError;

/// Row of `input_kegiatan`: one timestamped note written during a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Kegiatan {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "2024-03-01", format = "date", value_type = String)]
    pub tanggal: NaiveDate,
    #[schema(example = "Pagi", value_type = String)]
    pub shift: String,
    #[schema(example = "07:30")]
    pub jam: String,
    #[schema(example = "Patroli area parkir, kondisi aman")]
    pub kegiatan: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateKegiatan {
    #[schema(example = "2024-03-01", format = "date")]
    pub tanggal: Option<String>,
    #[schema(example = "Pagi")]
    pub shift: Option<String>,
    #[schema(example = "07:30")]
    pub jam: Option<String>,
    #[schema(example = "Patroli area parkir, kondisi aman")]
    pub kegiatan: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewKegiatan {
    pub tanggal: NaiveDate,
    pub shift: Shift,
    /// Normalized to `HH:MM` or `HH:MM:SS` so lexicographic order is time order.
    pub jam: String,
    pub kegiatan: String,
}

impl CreateKegiatan {
    pub fn validate(&self) -> Result<NewKegiatan, ApiError> {
        let tanggal = required(&self.tanggal, "Tanggal")?;
        let shift = required(&self.shift, "Shift")?;
        let jam = required(&self.jam, "Jam")?;
        let kegiatan = required(&self.kegiatan, "Kegiatan")?;

        Ok(NewKegiatan {
            tanggal: parse_tanggal(tanggal)?,
            shift: parse_shift(shift)?,
            jam: normalize_jam(jam)?,
            kegiatan: kegiatan.to_string(),
        })
    }
}

fn normalize_jam(raw: &str) -> Result<String, ApiError> {
    if let Ok(t) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(t.format("%H:%M").to_string());
    }
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .map(|t| t.format("%H:%M:%S").to_string())
        .map_err(|_| ApiError::Validation(format!("Jam tidak valid: {raw:?}, gunakan format HH:MM")))
}

/// Query string shared by `GET /laporan` and `GET /laporan/pdf`.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct LaporanQuery {
    /// Report date (YYYY-MM-DD)
    #[schema(example = "2024-03-01")]
    pub tanggal: Option<String>,
    /// Report shift (Pagi or Malam)
    #[schema(example = "Pagi")]
    pub shift: Option<String>,
}

impl LaporanQuery {
    /// `None` when neither filter is given; the caller then answers without querying.
    pub fn to_filter(&self) -> Result<Option<AttendanceFilter>, ApiError> {
        let tanggal = present(&self.tanggal);
        let shift = present(&self.shift);
        if tanggal.is_none() && shift.is_none() {
            return Ok(None);
        }

        Ok(Some(AttendanceFilter {
            tanggal: tanggal.map(parse_tanggal).transpose()?,
            shift: shift.map(parse_shift).transpose()?,
            nama: None,
        }))
    }

    /// Both filters, as the printed shift report needs them.
    pub fn require_both(&self) -> Result<(NaiveDate, Shift), ApiError> {
        let tanggal = parse_tanggal(required(&self.tanggal, "Tanggal")?)?;
        let shift = parse_shift(required(&self.shift, "Shift")?)?;
        Ok((tanggal, shift))
    }
}

/// The activity log of one shift together with its attendance roster.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct LaporanResponse {
    pub kegiatan: Vec<Kegiatan>,
    pub attendance: Vec<DaftarHadir>,
}
