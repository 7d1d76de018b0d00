// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use vhc_flow_audit::Actor;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Roles apply only to staff actors; customers act through the public
/// report link and are authenticated by its token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: operators with structural and corrective authority.
    ///
    /// Admins may perform:
    /// - every advisor and technician action
    /// - skipping check-in entirely
    /// - any other system-level or corrective actions
    Admin,
    /// Advisor role: front-desk operators who run the visit.
    ///
    /// Advisors may:
    /// - create health checks and record arrivals and check-ins
    /// - assign technicians and review completed inspections
    /// - price repair items and publish reports to the customer
    /// - record completion and close visits out
    Advisor,
    /// Technician role: workshop operators who inspect and repair.
    ///
    /// Technicians may:
    /// - start, pause, resume, and complete inspections
    /// - raise repair items from findings
    /// - record labour and parts completion
    Technician,
}

/// An authenticated actor with an associated role.
///
/// This represents a staff operator who has been authenticated and
/// has permission to perform certain actions based on their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording timeline events to attribute actions
    /// to the authenticated operator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Advisor => String::from("advisor"),
            Role::Technician => String::from("technician"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role. Customer operations
/// carry no role; they are guarded by the public token instead.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to perform an admin-only action.
    ///
    /// Skipping check-in and other corrective actions require the Admin
    /// role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_admin_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Advisor | Role::Technician => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to perform a front-desk action.
    ///
    /// Intake, check-in, review, pricing, publishing, and closure are
    /// advisor work; admins may perform them too.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Advisor or Admin role.
    pub fn authorize_advisor_action(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Advisor => Ok(()),
            Role::Technician => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Advisor"),
            }),
        }
    }

    /// Checks if an actor is authorized to perform workshop work.
    ///
    /// Inspections, raising repair items, and completion marking are
    /// open to every staff role.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// This check cannot fail today; the signature leaves room for
    /// per-site restrictions without changing every call site.
    pub const fn authorize_workshop_action(
        _actor: &AuthenticatedActor,
        _action: &str,
    ) -> Result<(), AuthError> {
        // Every staff role may work the inspection and completion flow
        Ok(())
    }
}
