//! Lookup-and-submit modals that add a record to the suspension list.

mod beneficiary;
mod employee;

pub use beneficiary::BeneficiaryIntake;
pub use employee::EmployeeIntake;

/// Raised by an intake modal towards its owning list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeEvent {
	/// The suspension record was created; the owner should close the
	/// modal and refetch its list.
	Committed,
}
