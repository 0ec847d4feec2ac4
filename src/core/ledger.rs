use crate::domain::model::{Reservation, SlotId, SlotStatus, SlotView};
use crate::utils::error::ReservationError;
use std::collections::HashMap;

/// 號碼與預約的唯一真實來源。
///
/// 號碼空間在建立時固定為 00..99；預約只能新增，不能修改或取消，
/// 因此一個號碼一旦被預約就永遠維持 `Reserved`。
#[derive(Debug, Clone)]
pub struct ReservationLedger {
    slots: Vec<SlotId>,
    // 依建立順序保存
    reservations: Vec<Reservation>,
    // 號碼 -> reservations 的索引
    by_slot: HashMap<SlotId, usize>,
}

impl ReservationLedger {
    pub fn new() -> Self {
        Self {
            slots: SlotId::all().collect(),
            reservations: Vec::new(),
            by_slot: HashMap::new(),
        }
    }

    pub fn list_slots(&self) -> &[SlotId] {
        &self.slots
    }

    pub fn is_reserved(&self, slot: SlotId) -> bool {
        self.by_slot.contains_key(&slot)
    }

    pub fn status(&self, slot: SlotId) -> SlotStatus {
        if self.is_reserved(slot) {
            SlotStatus::Reserved
        } else {
            SlotStatus::Available
        }
    }

    pub fn get(&self, slot: SlotId) -> Option<&Reservation> {
        self.by_slot.get(&slot).map(|&i| &self.reservations[i])
    }

    /// 驗證並登記一筆預約。任何失敗都不會改變帳本狀態。
    pub fn reserve(
        &mut self,
        slot: &str,
        name: &str,
        phone: &str,
    ) -> Result<Reservation, ReservationError> {
        let slot = SlotId::parse(slot)?;
        if self.is_reserved(slot) {
            return Err(ReservationError::SlotAlreadyReserved {
                slot: slot.to_string(),
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(ReservationError::MissingName);
        }
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(ReservationError::MissingPhone);
        }

        let reservation = Reservation {
            slot,
            name: name.to_string(),
            phone: phone.to_string(),
        };
        self.by_slot.insert(slot, self.reservations.len());
        self.reservations.push(reservation.clone());

        tracing::debug!(slot = %slot, occupancy = self.occupancy(), "slot claimed");
        Ok(reservation)
    }

    pub fn list_reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn occupancy(&self) -> usize {
        self.reservations.len()
    }

    pub fn available_slots(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .copied()
            .filter(|slot| !self.is_reserved(*slot))
            .collect()
    }

    pub fn slot_views(&self) -> Vec<SlotView> {
        self.slots
            .iter()
            .map(|&id| SlotView {
                id,
                reserved: self.is_reserved(id),
            })
            .collect()
    }
}

impl Default for ReservationLedger {
    fn default() -> Self {
        Self::new()
    }
}
