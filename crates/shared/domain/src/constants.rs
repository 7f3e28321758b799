//! Domain-level constants.
//!
//! Wire identifiers for roles, statuses and actions keep the catalog
//! spelling shared with the dashboard front-end.

// =============================================================================
// User Roles
// =============================================================================

/// Platform operator role
pub const ROLE_SUPERADMIN: &str = "superadmin";

/// Travel agency account role
pub const ROLE_AGENCY: &str = "agence";

/// Agency employee role, restricted by explicit grants
pub const ROLE_AGENT: &str = "agent";

// =============================================================================
// Account Statuses
// =============================================================================

pub const STATUS_ACTIVE: &str = "actif";
pub const STATUS_SUSPENDED: &str = "suspendu";
pub const STATUS_PENDING: &str = "en_attente";

// =============================================================================
// Permission Actions
// =============================================================================

pub const ACTION_READ: &str = "lire";
pub const ACTION_CREATE: &str = "creer";
pub const ACTION_UPDATE: &str = "modifier";
pub const ACTION_DELETE: &str = "supprimer";

// =============================================================================
// Navigation
// =============================================================================

pub const PATH_LOGIN: &str = "/auth/login";
pub const PATH_REGISTER: &str = "/auth/register";
pub const PATH_PENDING_APPROVAL: &str = "/auth/pending-approval";
pub const PATH_DASHBOARD: &str = "/dashboard";
pub const PATH_PROFILE: &str = "/profile";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Authentication
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
