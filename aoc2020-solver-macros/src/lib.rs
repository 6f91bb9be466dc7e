//! Procedural macros for the aoc2020-solver library

use proc_macro::TokenStream;
use proc_macro2::{Literal, Span};
use quote::quote;
use syn::{DeriveInput, Lit, LitStr, parse_macro_input};

/// Implements `Solver` by forwarding part `k` to `PartSolver<k>`
///
/// Requires `#[aoc_solver(max_parts = N)]`; the type must implement
/// `PartSolver<1>` through `PartSolver<N>`.
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc_solver"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AocSolver requires #[aoc_solver(max_parts = N)]")
        })?;

    let mut max_parts: Option<u8> = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("max_parts") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => max_parts = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "expected an integer")),
            }
            Ok(())
        } else {
            Err(meta.error("unsupported aoc_solver attribute"))
        }
    })?;

    let max_parts = max_parts.ok_or_else(|| syn::Error::new_spanned(attr, "missing max_parts"))?;
    if max_parts == 0 {
        return Err(syn::Error::new_spanned(attr, "max_parts must be at least 1"));
    }

    let parts: Vec<Literal> = (1..=max_parts).map(Literal::u8_unsuffixed).collect();
    let max_parts = Literal::u8_unsuffixed(max_parts);

    Ok(quote! {
        impl #impl_generics ::aoc2020_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #max_parts;

            fn solve_part(
                shared: &mut <Self as ::aoc2020_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc2020_solver::SolveError> {
                match part {
                    #( #parts => <Self as ::aoc2020_solver::PartSolver<#parts>>::solve(shared), )*
                    _ => ::core::result::Result::Err(::aoc2020_solver::SolveError::PartOutOfRange(part)),
                }
            }
        }
    })
}

/// Derive macro for automatically registering solvers with the plugin system
///
/// # Attributes
///
/// - `year`: Required. The Advent of Code year (e.g., 2020)
/// - `day`: Required. The day number (1-25)
/// - `variant`: Optional. Name of a sibling implementation; defaults to `"main"`
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["grid", "simulation"])
///
/// The type must implement the `Solver` trait, otherwise compilation fails with
/// an unsatisfied `MustImplementSolver` bound pointing at the type.
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2020, day = 6, variant = "alternate", tags = ["sets"])]
/// pub struct Solver;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let aoc_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new_spanned(name, "AutoRegisterSolver requires #[aoc(year = .., day = ..)]")
        })?;

    let mut year: Option<u16> = None;
    let mut day: Option<u8> = None;
    let mut variant: Option<LitStr> = None;
    let mut tags: Vec<LitStr> = Vec::new();

    aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => year = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "expected an integer year")),
            }
        } else if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => day = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "expected an integer day")),
            }
        } else if meta.path.is_ident("variant") {
            variant = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("tags") {
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            while !content.is_empty() {
                tags.push(content.parse()?);
                if content.peek(syn::Token![,]) {
                    let _: syn::Token![,] = content.parse()?;
                }
            }
        } else {
            return Err(meta.error("unsupported aoc attribute"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `year`"))?;
    let day = day.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `day`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(aoc_attr, "`day` must be within 1..=25"));
    }
    let variant = variant.unwrap_or_else(|| LitStr::new("main", Span::call_site()));

    let year = Literal::u16_unsuffixed(year);
    let day = Literal::u8_unsuffixed(day);

    Ok(quote! {
        const _: () = {
            trait MustImplementSolver: ::aoc2020_solver::Solver {}
            impl MustImplementSolver for #name {}
        };

        ::aoc2020_solver::inventory::submit! {
            ::aoc2020_solver::SolverPlugin {
                year: #year,
                day: #day,
                variant: #variant,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}
