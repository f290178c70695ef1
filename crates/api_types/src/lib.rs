use serde::{Deserialize, Serialize};

pub mod shipment {
    use super::*;

    /// A shipping record. The backend assigns the id on creation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Shipment {
        pub id: i64,
    }
}

pub mod calculation {
    use super::*;

    /// An income/cost record attached to one shipment.
    ///
    /// `profit_or_loss` is computed by the backend (`income - cost`) and is
    /// never recomputed by the client.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Calculation {
        pub id: i64,
        pub shipment_id: i64,
        pub income: f64,
        pub cost: f64,
        pub profit_or_loss: f64,
    }

    impl Calculation {
        pub fn outcome(&self) -> Outcome {
            Outcome::of(self.profit_or_loss)
        }
    }

    /// Request body for creating a calculation.
    #[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CalculationNew {
        pub income: f64,
        pub cost: f64,
    }

    /// Display classification of a profit/loss amount.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Outcome {
        Profit,
        Loss,
        BreakEven,
    }

    impl Outcome {
        pub fn of(profit_or_loss: f64) -> Self {
            if profit_or_loss > 0.0 {
                Self::Profit
            } else if profit_or_loss < 0.0 {
                Self::Loss
            } else {
                Self::BreakEven
            }
        }
    }
}
