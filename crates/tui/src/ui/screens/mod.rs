pub mod shipment_detail;
pub mod shipments;
