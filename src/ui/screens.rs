pub(crate) mod dashboard;
pub(crate) mod ledger;
pub(crate) mod register;
