use fixedbitset::FixedBitSet;

use crate::problem::node::NodeIdx;

/// Customers pending re-insertion, in removal order.
#[derive(Debug, Clone)]
pub struct RemovalBank {
    customers: Vec<NodeIdx>,
    members: FixedBitSet,
}

impl RemovalBank {
    pub fn new(num_nodes: usize) -> Self {
        RemovalBank {
            customers: Vec::new(),
            members: FixedBitSet::with_capacity(num_nodes),
        }
    }

    /// Returns false when the customer was already banked.
    pub fn push(&mut self, customer: NodeIdx) -> bool {
        if self.members.contains(customer.get()) {
            return false;
        }

        self.members.insert(customer.get());
        self.customers.push(customer);
        true
    }

    pub fn contains(&self, customer: NodeIdx) -> bool {
        self.members.contains(customer.get())
    }

    pub fn remove(&mut self, customer: NodeIdx) -> bool {
        if !self.contains(customer) {
            return false;
        }

        self.members.set(customer.get(), false);
        self.customers.retain(|&banked| banked != customer);
        true
    }

    pub fn first(&self) -> Option<NodeIdx> {
        self.customers.first().copied()
    }

    pub fn customers(&self) -> &[NodeIdx] {
        &self.customers
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.customers.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl Extend<NodeIdx> for RemovalBank {
    fn extend<T: IntoIterator<Item = NodeIdx>>(&mut self, iter: T) {
        for customer in iter {
            self.push(customer);
        }
    }
}
