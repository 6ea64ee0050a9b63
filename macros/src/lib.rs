//! Derive macros for Playgrid widget actions
//!
//! This crate provides procedural macros to reduce boilerplate when building
//! widget reducers with Playgrid.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (commands/events)
//!
//! # Example
//!
//! ```ignore
//! use playgrid_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TicketAction {
//!     #[command]
//!     SelectVariant { index: usize },
//!
//!     #[event]
//!     SelectionCommitted { variant_id: String },
//! }
//!
//! // Generated methods:
//! assert!(TicketAction::SelectVariant { index: 0 }.is_command());
//! assert_eq!(
//!     TicketAction::SelectionCommitted { variant_id: "v".into() }.label(),
//!     "selection-committed",
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_command()` - Returns true if this variant is a command (user intent)
/// - `is_event()` - Returns true if this variant is an event (result of work)
/// - `label()` - Returns a kebab-case variant name for tracing fields
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum CheckoutAction {
///     #[command]
///     Submit,
///
///     #[event]
///     CartCreated { checkout_url: String },
///
///     #[event]
///     CartCreationFailed { message: String },
/// }
///
/// let action = CheckoutAction::Submit;
/// assert!(action.is_command());
/// assert!(!action.is_event());
/// assert_eq!(action.label(), "submit");
/// ```
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut command_variants = Vec::new();
    let mut event_variants = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(
                variant,
                "Variant cannot be both #[command] and #[event]",
            )
            .to_compile_error()
            .into();
        }

        if is_command {
            command_variants.push(variant);
        }

        if is_event {
            event_variants.push(variant);
        }
    }

    let is_command_arms = command_variants.iter().map(|variant| {
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { .. } => true, },
            Fields::Unnamed(_) => quote! { Self::#ident(..) => true, },
            Fields::Unit => quote! { Self::#ident => true, },
        }
    });

    let is_event_arms = event_variants.iter().map(|variant| {
        let ident = &variant.ident;
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { .. } => true, },
            Fields::Unnamed(_) => quote! { Self::#ident(..) => true, },
            Fields::Unit => quote! { Self::#ident => true, },
        }
    });

    let label_arms = data_enum.variants.iter().map(|variant| {
        let ident = &variant.ident;
        let label = kebab_case(&ident.to_string());
        match &variant.fields {
            Fields::Named(_) => quote! { Self::#ident { .. } => #label, },
            Fields::Unnamed(_) => quote! { Self::#ident(..) => #label, },
            Fields::Unit => quote! { Self::#ident => #label, },
        }
    });

    let expanded = quote! {
        impl #name {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)] // every variant may be marked
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }

            /// Returns a kebab-case variant name, suitable for tracing fields
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    #(#label_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Check if an attribute list contains a specific attribute name
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Convert a CamelCase identifier to kebab-case
fn kebab_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::kebab_case;

    #[test]
    fn kebab_case_splits_on_uppercase() {
        assert_eq!(kebab_case("SelectVariant"), "select-variant");
        assert_eq!(kebab_case("Submit"), "submit");
        assert_eq!(kebab_case("CartCreationFailed"), "cart-creation-failed");
    }
}
