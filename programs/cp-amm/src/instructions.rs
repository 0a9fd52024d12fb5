pub mod fee_math;
pub mod initialize_pool;
pub mod deposit;
pub mod swap;
pub mod withdraw;
pub mod set_lock;
