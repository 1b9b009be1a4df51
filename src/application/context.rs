//! Collaborators shared by every flow handler.

use std::collections::HashSet;
use std::sync::Arc;

use super::checkout::CheckoutService;
use crate::domain::foundation::{LanguageCode, UserId};
use crate::domain::i18n::{MessageArg, PhraseResolver};
use crate::ports::{CatalogStore, OrderLedger, UserRepository};

/// Explicit context passed to every handler, and from one handler to
/// another when a flow re-renders a neighbouring state's view.
#[derive(Clone)]
pub struct HandlerContext {
    pub catalog: Arc<dyn CatalogStore>,
    pub ledger: Arc<dyn OrderLedger>,
    pub users: Arc<dyn UserRepository>,
    pub phrases: PhraseResolver,
    pub checkout: CheckoutService,
    admins: Arc<HashSet<UserId>>,
}

impl HandlerContext {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        ledger: Arc<dyn OrderLedger>,
        users: Arc<dyn UserRepository>,
        phrases: PhraseResolver,
        checkout: CheckoutService,
        admins: impl IntoIterator<Item = UserId>,
    ) -> Self {
        Self {
            catalog,
            ledger,
            users,
            phrases,
            checkout,
            admins: Arc::new(admins.into_iter().collect()),
        }
    }

    /// Admin status comes from configuration only.
    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admins.contains(&user_id)
    }

    /// Phrase lookups bound to one language.
    pub fn phrases_for<'a>(&'a self, language: &'a LanguageCode) -> Phrases<'a> {
        Phrases::new(&self.phrases, language)
    }
}

/// A resolver paired with the language of the user being answered.
#[derive(Clone, Copy)]
pub struct Phrases<'a> {
    resolver: &'a PhraseResolver,
    language: &'a LanguageCode,
}

impl<'a> Phrases<'a> {
    pub fn new(resolver: &'a PhraseResolver, language: &'a LanguageCode) -> Self {
        Self { resolver, language }
    }

    pub fn language(&self) -> &LanguageCode {
        self.language
    }

    pub fn resolver(&self) -> &PhraseResolver {
        self.resolver
    }

    /// Phrase without placeholders.
    pub fn t(&self, key: &str) -> String {
        self.resolver.resolve(self.language, key, &[])
    }

    /// Phrase with named arguments.
    pub fn tr(&self, key: &str, args: &[MessageArg]) -> String {
        self.resolver.resolve(self.language, key, args)
    }

    /// Phrase with named arguments and a fallback used when no language has the key.
    pub fn tr_or(&self, key: &str, args: &[MessageArg], default: &str) -> String {
        self.resolver.resolve_or(self.language, key, args, default)
    }
}
