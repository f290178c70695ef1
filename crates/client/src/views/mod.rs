//! View-models behind the two screens of the front-end.
//!
//! Each view owns its data, a loading flag and a [`CancellationToken`]
//! cancelled on teardown. Backend failures never escape a view: they become
//! error notifications and the view stays usable.
//!
//! [`CancellationToken`]: crate::cancel::CancellationToken

mod shipment_detail;
mod shipments;

#[cfg(test)]
mod testing;

pub use shipment_detail::{
    FieldErrors, PAGE_SIZE_OPTIONS, ShipmentDetailView, SortColumn, SortDirection, SortState,
};
pub use shipments::ShipmentsView;
