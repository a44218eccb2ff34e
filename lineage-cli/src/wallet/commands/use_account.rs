use crate::wallet::error::WalletError;
use crate::wallet::format::print_success;
use crate::wallet::WalletContext;

pub fn run(ctx: &WalletContext, address: &str) -> Result<(), WalletError> {
    let mut state = ctx.state()?;
    state.set_active(&ctx.store, address)?;
    ctx.save_state(&state)?;
    let active = state.active_account()?;
    print_success(&format!("Active account set to {}", active));
    Ok(())
}
