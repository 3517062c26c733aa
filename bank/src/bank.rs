//! Store-backed implementation of the ledger and supply collaborators.
//!
//! Multi-leg operations (module transfers, mint, burn) write each leg as soon
//! as it succeeds. They are only atomic when run against a `CacheStore` that is
//! discarded on failure, which is how the staking keeper always calls them.

use tokenpool_store::StateStore;
use tokenpool_types::{Account, Address, Int, Permission, Supply};

use crate::{AccountLedger, BankError, ModuleRegistry, SupplyTracker};

pub struct Bank<'a, S: ?Sized> {
    store: &'a S,
    modules: &'a ModuleRegistry,
}

impl<'a, S: StateStore + ?Sized> Bank<'a, S> {
    pub fn new(store: &'a S, modules: &'a ModuleRegistry) -> Self {
        Self { store, modules }
    }

    pub fn modules(&self) -> &ModuleRegistry {
        self.modules
    }

    /// Fetch a module account, creating it from the registry on first use.
    pub fn module_account(&self, name: &str) -> Result<Account, BankError> {
        let address = Address::for_module(name);
        if let Some(account) = self.store.get_account(&address)? {
            return Ok(account);
        }
        let permissions = self
            .modules
            .permissions(name)
            .ok_or_else(|| BankError::UnknownModule(name.to_string()))?;
        let account = Account::module(name, permissions.to_vec());
        self.store.put_account(&account)?;
        tracing::debug!(module = name, address = %address, "created module account");
        Ok(account)
    }

    pub fn send_from_account_to_module(
        &self,
        sender: &Address,
        module: &str,
        amount: Int,
    ) -> Result<(), BankError> {
        let recipient = self.module_account(module)?.address;
        self.debit(sender, amount)?;
        self.credit(&recipient, amount)
    }

    pub fn send_from_module_to_account(
        &self,
        module: &str,
        recipient: &Address,
        amount: Int,
    ) -> Result<(), BankError> {
        let sender = self.module_account(module)?.address;
        self.debit(&sender, amount)?;
        self.credit(recipient, amount)
    }

    /// Create `amount` new tokens in a module holding the `Minter` permission.
    pub fn mint_coins(&self, module: &str, amount: Int) -> Result<(), BankError> {
        let account = self.require_permission(module, Permission::Minter)?;
        self.credit(&account.address, amount)?;
        self.notify_mint(amount)?;
        tracing::debug!(module, %amount, "minted coins");
        Ok(())
    }

    /// Destroy `amount` tokens held by a module with the `Burner` permission.
    pub fn burn_coins(&self, module: &str, amount: Int) -> Result<(), BankError> {
        let account = self.require_permission(module, Permission::Burner)?;
        self.debit(&account.address, amount)?;
        self.notify_burn(amount)?;
        tracing::debug!(module, %amount, "burned coins");
        Ok(())
    }

    fn require_permission(&self, module: &str, permission: Permission) -> Result<Account, BankError> {
        let account = self.module_account(module)?;
        if !account.has_permission(permission) {
            return Err(BankError::MissingPermission {
                module: module.to_string(),
                permission,
            });
        }
        Ok(account)
    }
}

fn ensure_non_negative(amount: Int) -> Result<(), BankError> {
    if amount.is_negative() {
        return Err(BankError::NegativeAmount(amount));
    }
    Ok(())
}

impl<S: StateStore + ?Sized> AccountLedger for Bank<'_, S> {
    fn balance_of(&self, address: &Address) -> Result<Int, BankError> {
        Ok(self
            .store
            .get_account(address)?
            .map(|a| a.balance)
            .unwrap_or(Int::ZERO))
    }

    fn debit(&self, address: &Address, amount: Int) -> Result<(), BankError> {
        ensure_non_negative(amount)?;
        let mut account = self
            .store
            .get_account(address)?
            .unwrap_or_else(|| Account::regular(*address));
        if account.balance < amount {
            return Err(BankError::InsufficientFunds {
                address: *address,
                needed: amount,
                available: account.balance,
            });
        }
        account.balance = account
            .balance
            .checked_sub(amount)
            .ok_or(BankError::Overflow)?;
        self.store.put_account(&account)?;
        Ok(())
    }

    fn credit(&self, address: &Address, amount: Int) -> Result<(), BankError> {
        ensure_non_negative(amount)?;
        let mut account = self
            .store
            .get_account(address)?
            .unwrap_or_else(|| Account::regular(*address));
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(BankError::Overflow)?;
        self.store.put_account(&account)?;
        Ok(())
    }
}

impl<S: StateStore + ?Sized> SupplyTracker for Bank<'_, S> {
    fn total_supply(&self) -> Result<Int, BankError> {
        Ok(self.store.get_supply()?.total)
    }

    fn notify_mint(&self, amount: Int) -> Result<(), BankError> {
        ensure_non_negative(amount)?;
        let supply = self.store.get_supply()?;
        let total = supply.total.checked_add(amount).ok_or(BankError::Overflow)?;
        self.store.put_supply(&Supply::new(total))?;
        Ok(())
    }

    fn notify_burn(&self, amount: Int) -> Result<(), BankError> {
        ensure_non_negative(amount)?;
        let supply = self.store.get_supply()?;
        if supply.total < amount {
            return Err(BankError::InsufficientSupply {
                needed: amount,
                available: supply.total,
            });
        }
        let total = supply.total.checked_sub(amount).ok_or(BankError::Overflow)?;
        self.store.put_supply(&Supply::new(total))?;
        Ok(())
    }
}
