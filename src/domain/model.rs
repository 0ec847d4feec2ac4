use crate::utils::error::ReservationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 號碼總數，固定 00..99
pub const SLOT_COUNT: u8 = 100;

/// 抽獎號碼，顯示為兩位數補零的字串 ("00".."99")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(u8);

impl SlotId {
    pub fn new(value: u8) -> Option<Self> {
        (value < SLOT_COUNT).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// 依數字遞增產生全部 100 個號碼
    pub fn all() -> impl Iterator<Item = SlotId> {
        (0..SLOT_COUNT).map(SlotId)
    }

    pub fn parse(label: &str) -> std::result::Result<Self, ReservationError> {
        label.parse()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

impl FromStr for SlotId {
    type Err = ReservationError;

    // 只接受剛好兩位 ASCII 數字，"7" 或 " 07" 都不是合法號碼
    fn from_str(label: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = label.as_bytes();
        if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ReservationError::InvalidSlot {
                slot: label.to_string(),
            });
        }
        Ok(SlotId((bytes[0] - b'0') * 10 + (bytes[1] - b'0')))
    }
}

impl Serialize for SlotId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Available,
    Reserved,
}

/// 一筆預約：號碼、姓名、電話，建立後不可變更
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(rename = "number")]
    pub slot: SlotId,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: SlotId,
    pub reserved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub slot: String,
    pub name: String,
    pub phone: String,
}

impl ReservationRequest {
    pub fn new(slot: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            name: name.into(),
            phone: phone.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleInfo {
    pub title: String,
    pub prize: String,
    pub prize_features: Vec<String>,
    pub draw_date: String,
    pub draw_source: String,
}

impl Default for RaffleInfo {
    fn default() -> Self {
        Self {
            title: "Rifa de Smartwatch".to_string(),
            prize: "Smartwatch Premium".to_string(),
            prize_features: vec![
                "Monitoreo de salud".to_string(),
                "GPS integrado".to_string(),
                "Batería de larga duración".to_string(),
                "Resistente al agua".to_string(),
            ],
            draw_date: "09/04/2025".to_string(),
            draw_source: "Últimos números Lotería Cruz Roja".to_string(),
        }
    }
}
