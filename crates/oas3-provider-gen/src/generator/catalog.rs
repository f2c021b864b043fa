/// Resource paths known to project cleanly, generated when no path is given.
pub const KNOWN_RESOURCE_PATHS: &[&str] = &[
  "/applications/{application-id}",
  "/devices/{device-id}",
  "/domains/{domain-id}",
  "/groups/{group-id}",
  "/groups/{group-id}/owners",
  "/identity/conditionalAccess/namedLocations/{namedLocation-id}",
  "/identity/conditionalAccess/policies/{conditionalAccessPolicy-id}",
  "/servicePrincipals/{servicePrincipal-id}",
  "/users/{user-id}",
  "/users/{user-id}/authentication/methods/{authenticationMethod-id}",
];
