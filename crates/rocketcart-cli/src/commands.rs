//! Subcommands and their dispatch onto the cart manager.

use clap::Subcommand;

use rocketcart_core::{CartChange, CartError, CartManager, ProductId};

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the cart (default)
    List,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Empty the cart
    Clear,
}

/// Run one command against the cart. No command means `list`.
pub async fn execute(
    cart: &CartManager,
    command: Option<Command>,
) -> Result<CartChange, CartError> {
    match command.unwrap_or(Command::List) {
        Command::List => Ok(CartChange::Unchanged),
        Command::Add { product_id } => cart.add_product(product_id).await,
        Command::Remove { product_id } => cart.remove_product(product_id).await,
        Command::Update { product_id, amount } => {
            cart.update_product_amount(product_id, amount).await
        }
        Command::Clear => Ok(cart.clear().await),
    }
}

/// Process exit status for a command outcome.
pub fn exit_status(outcome: &Result<CartChange, CartError>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
