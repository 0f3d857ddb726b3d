use serde::Deserialize;

#[derive(Deserialize)]
pub struct TmyDocument {
    pub outputs: TmyOutputs,
}

#[derive(Deserialize)]
pub struct TmyOutputs {
    pub tmy_hourly: Vec<TmyRecord>,
}

#[derive(Deserialize)]
pub struct TmyRecord {
    #[serde(rename = "time(UTC)")]
    pub time: String,
    #[serde(rename = "G(h)")]
    pub ghi: f64,
    #[serde(rename = "Gb(n)")]
    pub dni: f64,
    #[serde(rename = "Gd(h)")]
    pub dhi: f64,
}
