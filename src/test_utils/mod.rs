#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button, assert_hx_endpoint,
    must_get_form,
};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment_str, parse_html_str,
};
pub(crate) use http::{assert_hx_redirect, assert_status_ok, get_header};
