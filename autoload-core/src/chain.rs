// Resolver chain - the "class not found" hook a host dispatches through

use crate::error::ChainError;
use log::debug;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Anything that can map a class name to the file defining it
pub trait ClassResolver {
    /// `None` means "not found here"; the chain moves on to the next resolver
    fn resolve(&mut self, class_name: &str) -> Option<PathBuf>;
}

impl<F> ClassResolver for F
where
    F: FnMut(&str) -> Option<PathBuf>,
{
    fn resolve(&mut self, class_name: &str) -> Option<PathBuf> {
        self(class_name)
    }
}

/// A resolver shared between its owner and the chain
pub type SharedResolver = Rc<RefCell<dyn ClassResolver>>;

/// Ordered list of resolvers tried in turn until one finds the class.
///
/// Single-threaded by construction; each thread or request owns its chain.
#[derive(Default)]
pub struct AutoloadChain {
    resolvers: Vec<SharedResolver>,
}

impl AutoloadChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append (or prepend) a resolver.
    ///
    /// Registering the same instance twice leaves the chain unchanged and
    /// returns `false`.
    pub fn register(&mut self, resolver: SharedResolver, prepend: bool) -> bool {
        if self.is_registered(&resolver) {
            debug!("Resolver already registered, skipping");
            return false;
        }

        if prepend {
            self.resolvers.insert(0, resolver);
        } else {
            self.resolvers.push(resolver);
        }
        true
    }

    /// Remove a previously registered resolver
    pub fn unregister(&mut self, resolver: &SharedResolver) -> Result<(), ChainError> {
        let index = self
            .position(resolver)
            .ok_or(ChainError::NotRegistered)?;
        self.resolvers.remove(index);
        Ok(())
    }

    pub fn is_registered(&self, resolver: &SharedResolver) -> bool {
        self.position(resolver).is_some()
    }

    /// Ask each resolver in order; the first hit wins.
    ///
    /// A miss from every resolver is `Ok(None)`. A resolver that is already
    /// busy (a resolution that re-enters the chain) is an error.
    pub fn resolve(&self, class_name: &str) -> Result<Option<PathBuf>, ChainError> {
        for resolver in &self.resolvers {
            let mut resolver =
                resolver
                    .try_borrow_mut()
                    .map_err(|_| ChainError::Reentrant {
                        class_name: class_name.to_string(),
                    })?;

            if let Some(file) = resolver.resolve(class_name) {
                return Ok(Some(file));
            }
        }

        debug!(
            "Class {} not found by any of {} resolvers",
            class_name,
            self.resolvers.len()
        );
        Ok(None)
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn position(&self, resolver: &SharedResolver) -> Option<usize> {
        // Compare data pointers only; vtable pointers are not unique
        let target = Rc::as_ptr(resolver) as *const ();
        self.resolvers
            .iter()
            .position(|r| Rc::as_ptr(r) as *const () == target)
    }
}

impl std::fmt::Debug for AutoloadChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoloadChain")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}
