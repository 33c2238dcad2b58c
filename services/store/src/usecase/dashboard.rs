use uuid::Uuid;

use shopfront_domain::role::Role;

use crate::domain::repository::{
    AdminRepository, OrderRepository, ProductRepository, RoleResolver, UserRepository,
};
use crate::domain::types::DashboardStats;
use crate::error::StoreServiceError;

pub struct DashboardStatsUseCase<G, P, O, U, A>
where
    G: RoleResolver,
    P: ProductRepository,
    O: OrderRepository,
    U: UserRepository,
    A: AdminRepository,
{
    pub access: G,
    pub products: P,
    pub orders: O,
    pub users: U,
    pub admins: A,
}

impl<G, P, O, U, A> DashboardStatsUseCase<G, P, O, U, A>
where
    G: RoleResolver,
    P: ProductRepository,
    O: OrderRepository,
    U: UserRepository,
    A: AdminRepository,
{
    pub async fn execute(&self, caller: Option<Uuid>) -> Result<DashboardStats, StoreServiceError> {
        self.access.require(caller, Role::Admin).await?;
        let (total_products, order_stats, total_users, total_admins) = futures::try_join!(
            self.products.count(),
            self.orders.stats(),
            self.users.count(),
            self.admins.count(),
        )?;
        Ok(DashboardStats {
            total_products,
            total_orders: order_stats.total_orders,
            total_users,
            total_admins,
            total_revenue: order_stats.total_revenue,
            pending_orders: order_stats.pending_orders,
        })
    }
}
