//! Server-side HTML for the catalog pages.

use std::fmt::{self, Write};

use verne_authz::{permitted_actions, Availability, Role};

use super::form::{max_year, CreateBookForm, MIN_YEAR};
use super::models::Book;
use crate::utils::escape_html;

const STYLESHEET: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f6f4ef;color:#222}\
.hero-header{padding:1.5rem 2rem;background:#1d3557;color:#fff}\
.top-nav a{color:#fff;text-decoration:none;font-weight:600}\
.search-form{margin-top:1rem;display:flex;gap:.5rem}\
.admin-actions{margin-top:1rem}\
.admin-btn,.btn-primary,.btn-secondary,.loan-button{padding:.4rem .8rem;border-radius:4px;border:1px solid #1d3557;background:#fff;color:#1d3557;text-decoration:none}\
.book-list{padding:1rem 2rem;display:grid;gap:1rem}\
.book-card{display:flex;justify-content:space-between;background:#fff;padding:1rem;border-radius:6px}\
.book-meta span{margin-right:1rem;color:#666}\
.status-badge{display:inline-block;padding:.2rem .5rem;border-radius:10px;background:#ddd;margin-bottom:.5rem}\
.status-badge.available{background:#cdeccd}.status-badge.borrowed{background:#f7e3b5}\
.status-badge.reserved{background:#d9d2f2}.status-badge.unavailable{background:#f2c4c4}\
.modal-container{margin:1rem 2rem;padding:1rem;background:#fff;border-radius:6px}\
.form-grid{display:grid;grid-template-columns:1fr 1fr;gap:.75rem}\
.input-group{display:flex;flex-direction:column}\
.form-error{color:#a4161a;font-weight:600}";

/// Locks the form once the browser posts it, so a second click cannot send
/// the record twice. Inputs become read-only rather than disabled because
/// disabled fields are left out of the post.
const SUBMIT_LOCK: &str = "this.querySelectorAll('input,textarea')\
.forEach(function(field){field.readOnly=true});\
this.querySelector('[type=submit]').disabled=true;\
this.setAttribute('aria-busy','true')";

/// Page-wide values every render needs.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub site_title: &'a str,
    pub role: Role,
    /// Path the books module is mounted under, e.g. `/books`.
    pub base_path: &'a str,
    pub query: &'a str,
}

/// Renders the listing page, with the creation form when it is open.
pub fn render_listing<'b>(
    ctx: &PageContext<'_>,
    books: impl IntoIterator<Item = &'b Book>,
    form: &CreateBookForm,
) -> Result<String, fmt::Error> {
    let mut html = String::with_capacity(4096);
    let site_title = escape_html(ctx.site_title);

    write!(
        html,
        "<!doctype html><html lang=\"fr\"><head><meta charset=\"utf-8\">\
         <title>{site_title}</title><style>{STYLESHEET}</style></head><body>"
    )?;
    write_header(&mut html, ctx, &site_title)?;

    if ctx.role.is_admin() && form.is_open() {
        write_form(&mut html, ctx, form)?;
    }

    html.push_str("<main class=\"book-list\">");
    let mut rendered = 0usize;
    for book in books {
        write_book(&mut html, book, ctx.role)?;
        rendered += 1;
    }
    if rendered == 0 {
        html.push_str("<p class=\"empty-list\">No books to show.</p>");
    }
    html.push_str("</main></body></html>");

    Ok(html)
}

fn write_header(html: &mut String, ctx: &PageContext<'_>, site_title: &str) -> fmt::Result {
    let base = escape_html(ctx.base_path);
    write!(
        html,
        "<header class=\"hero-header\"><nav class=\"top-nav\" aria-label=\"Main navigation\">\
         <a href=\"/\" class=\"logo-link\">{site_title}</a></nav>\
         <form class=\"search-form\" role=\"search\" method=\"get\" action=\"{base}\">\
         <input type=\"text\" name=\"q\" value=\"{query}\" placeholder=\"Les Fleurs du Mal...\" \
         aria-label=\"Search a book\"><button type=\"submit\" class=\"search-button\">Search</button>\
         </form>",
        query = escape_html(ctx.query),
    )?;
    if ctx.role.is_admin() {
        write!(
            html,
            "<div class=\"admin-actions\"><a class=\"admin-btn\" href=\"{base}?form=open\">Add a book</a></div>"
        )?;
    }
    html.push_str("</header>");
    Ok(())
}

fn write_book(html: &mut String, book: &Book, role: Role) -> fmt::Result {
    write!(
        html,
        "<article class=\"book-card\" data-id=\"{id}\"><div class=\"book-details\">\
         <header class=\"book-header\"><h2 class=\"book-title\">{title}</h2>\
         <p class=\"book-author\">{author}</p></header><div class=\"book-meta\">",
        id = book.id,
        title = escape_html(&book.title),
        author = escape_html(&book.author),
    )?;
    if let Some(year) = book.year {
        write!(html, "<span class=\"book-year\">{year}</span>")?;
    }
    if let Some(isbn) = &book.isbn {
        write!(html, "<span class=\"book-isbn\">{}</span>", escape_html(isbn))?;
    }
    if let Some(publisher) = &book.publisher {
        write!(html, "<span class=\"book-publisher\">{}</span>", escape_html(publisher))?;
    }
    html.push_str("</div>");
    if let Some(summary) = &book.summary {
        write!(html, "<p class=\"book-description\">{}</p>", escape_html(summary))?;
    }

    write!(
        html,
        "</div><div class=\"book-actions\"><span class=\"{class}\">{label}</span>",
        class = book.status.badge_class(),
        label = book.status.label(),
    )?;
    write_actions(html, book.status, role)?;
    html.push_str("</div></article>");
    Ok(())
}

fn write_actions(html: &mut String, status: Availability, role: Role) -> fmt::Result {
    let actions = permitted_actions(status, role);
    if actions.is_empty() {
        return write!(
            html,
            "<button class=\"loan-button disabled-button\" disabled>{}</button>",
            status.label()
        );
    }
    for action in actions {
        write!(
            html,
            "<button type=\"button\" class=\"{}\">{}</button>",
            action.css_class(),
            action.label()
        )?;
    }
    Ok(())
}

fn write_form(html: &mut String, ctx: &PageContext<'_>, form: &CreateBookForm) -> fmt::Result {
    let input = form.input();
    let base = escape_html(ctx.base_path);

    write!(
        html,
        "<section class=\"modal-container\" aria-labelledby=\"create-book-title\">\
         <header class=\"modal-header\"><h2 id=\"create-book-title\">Add a new book</h2>\
         <a class=\"close-button\" href=\"{base}\" aria-label=\"Close\">&times;</a></header>"
    )?;
    if let Some(error) = form.error() {
        write!(html, "<p class=\"form-error\" role=\"alert\">{}</p>", escape_html(error))?;
    }
    write!(
        html,
        "<form class=\"modal-form\" method=\"post\" action=\"{base}\" onsubmit=\"{SUBMIT_LOCK}\">\
         <div class=\"form-grid\">"
    )?;

    write_text_input(html, "title", "Title", &input.title, "Ex: Michel Strogoff", true)?;
    write_text_input(html, "author", "Author", &input.author, "Ex: Jules Verne", true)?;
    write_text_input(html, "isbn", "ISBN", &input.isbn, "978-2070409102", false)?;
    write_text_input(html, "publisher", "Publisher", &input.publisher, "Hetzel", false)?;

    write!(
        html,
        "<div class=\"input-group\"><label for=\"status\">Initial status</label>\
         <select id=\"status\" name=\"status\">"
    )?;
    let selected_status = Availability::parse_lenient(&input.status);
    for status in Availability::SELECTABLE {
        let selected = if status == selected_status { " selected" } else { "" };
        write!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            status.as_str(),
            status.label()
        )?;
    }
    html.push_str("</select></div>");

    write!(
        html,
        "<div class=\"input-group\"><label for=\"year\">Publication year</label>\
         <input type=\"number\" id=\"year\" name=\"year\" min=\"{MIN_YEAR}\" max=\"{max}\" \
         value=\"{value}\" placeholder=\"1876\"></div>",
        max = max_year(),
        value = escape_html(&input.year),
    )?;
    write!(
        html,
        "<div class=\"input-group\"><label for=\"category_id\">Category</label>\
         <input type=\"number\" id=\"category_id\" name=\"category_id\" min=\"1\" \
         value=\"{}\"></div>",
        escape_html(&input.category_id),
    )?;
    write!(
        html,
        "</div><div class=\"input-group full-width\"><label for=\"summary\">Summary</label>\
         <textarea id=\"summary\" name=\"summary\" rows=\"3\" \
         placeholder=\"Description of the work...\">{}</textarea></div>",
        escape_html(&input.summary),
    )?;
    write!(
        html,
        "<footer class=\"modal-actions\"><a class=\"btn-secondary\" href=\"{base}\">Cancel</a>\
         <button type=\"submit\" class=\"btn-primary\">Save the book</button></footer>\
         </form></section>"
    )
}

fn write_text_input(
    html: &mut String,
    name: &str,
    label: &str,
    value: &str,
    placeholder: &str,
    required: bool,
) -> fmt::Result {
    let required = if required { " required" } else { "" };
    write!(
        html,
        "<div class=\"input-group\"><label for=\"{name}\">{label}</label>\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\" \
         placeholder=\"{placeholder}\"{required}></div>",
        value = escape_html(value),
    )
}
