mod ledger_actor;
mod reconcile_actor;

pub use ledger_actor::LedgerActor;
pub use reconcile_actor::ReconcileActor;
