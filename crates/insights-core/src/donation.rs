//! ============================================================================
//! Donation Tally - Simulated "buy me a coffee" pledges
//! ============================================================================
//! Cup counting and per-channel pricing for the donation dialog. The
//! confirmation is taken at the donor's word: no payment gateway is
//! consulted and no money moves. The host owns the dialog chrome and
//! QR codes; this module owns the arithmetic and the pledge log.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::info;

/// Price of one cup in CNY (WeChat / Alipay)
pub const CUP_PRICE_CNY: u64 = 10;
/// Price of one cup in USD (PayPal)
pub const CUP_PRICE_USD: u64 = 2;

/// Smallest and largest selectable cup counts
pub const MIN_CUPS: u32 = 1;
pub const MAX_CUPS: u32 = 100;

/// Quick-select buttons offered by the dialog
pub const CUP_PRESETS: [u32; 3] = [1, 3, 5];

/// Payment channels offered by the donation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    WeChat,
    Alipay,
    PayPal,
}

impl PaymentChannel {
    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentChannel::WeChat => "WeChat Pay",
            PaymentChannel::Alipay => "Alipay",
            PaymentChannel::PayPal => "PayPal",
        }
    }

    /// Amount due for `cups` in this channel's currency
    pub fn amount_due(&self, cups: u32) -> u64 {
        match self {
            PaymentChannel::WeChat | PaymentChannel::Alipay => cups as u64 * CUP_PRICE_CNY,
            PaymentChannel::PayPal => cups as u64 * CUP_PRICE_USD,
        }
    }

    /// Amount with currency symbol, e.g. "¥30" or "$6"
    pub fn amount_display(&self, cups: u32) -> String {
        match self {
            PaymentChannel::WeChat | PaymentChannel::Alipay => {
                format!("¥{}", self.amount_due(cups))
            }
            PaymentChannel::PayPal => format!("${}", self.amount_due(cups)),
        }
    }
}

/// Record of one simulated "I have paid" confirmation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationReceipt {
    pub cups: u32,
    pub channel: PaymentChannel,
    /// Amount in the channel's currency at confirmation time
    pub amount: u64,
    /// Unix seconds of the confirmation
    pub confirmed_at: i64,
}

/// Cup selection and pledge log for one viewer's donation dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationTally {
    cups: u32,
    receipts: Vec<DonationReceipt>,
}

impl Default for DonationTally {
    fn default() -> Self {
        Self::new()
    }
}

impl DonationTally {
    pub fn new() -> Self {
        Self {
            cups: MIN_CUPS,
            receipts: Vec::new(),
        }
    }

    pub fn cups(&self) -> u32 {
        self.cups
    }

    /// Select a cup count, clamped to the dialog's bounds
    pub fn set_cups(&mut self, cups: u32) {
        self.cups = cups.clamp(MIN_CUPS, MAX_CUPS);
    }

    /// Confirm the current selection as paid, with no verification.
    pub fn confirm_paid(&mut self, channel: PaymentChannel, now: i64) -> DonationReceipt {
        let receipt = DonationReceipt {
            cups: self.cups,
            channel,
            amount: channel.amount_due(self.cups),
            confirmed_at: now,
        };
        info!(
            "Donation pledged: {} cups via {} ({})",
            receipt.cups,
            channel.display_name(),
            channel.amount_display(receipt.cups)
        );
        self.receipts.push(receipt.clone());
        receipt
    }

    /// All pledges confirmed through this tally
    pub fn receipts(&self) -> &[DonationReceipt] {
        &self.receipts
    }
}
