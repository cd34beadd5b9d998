//! Add command - create one placement record

use anyhow::Result;
use college_connect::autocomplete::Field;
use college_connect::pages::add::{AddForm, AddPage};

use super::{settle, terminal, Context};

/// Options for the add command; missing required fields are prompted for
#[derive(Debug, Default)]
pub struct AddOptions {
    pub college: Option<String>,
    pub company: Option<String>,
    pub role: Option<String>,
    pub ctc: Option<String>,
    pub hr_name: Option<String>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl AddOptions {
    /// Form pre-filled from the flags; absent flags stay blank.
    pub fn to_form(&self) -> AddForm {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        AddForm {
            college_name: text(&self.college),
            company_name: text(&self.company),
            role: text(&self.role),
            ctc: text(&self.ctc),
            hr_name: text(&self.hr_name),
            linkedin_id: text(&self.linkedin),
            email: text(&self.email),
            contact_number: text(&self.phone),
        }
    }
}

pub fn execute(ctx: &Context<'_>, options: AddOptions) -> Result<()> {
    ctx.console.loading("suggestions");
    let (mut page, notices) = AddPage::open(ctx.backend, ctx.suggestion_limit());
    ctx.console.notices(&notices);
    page.form = options.to_form();

    let mut prompt = terminal();
    for field in [Field::CollegeName, Field::CompanyName, Field::Role] {
        let current = match field {
            Field::CollegeName => &page.form.college_name,
            Field::CompanyName => &page.form.company_name,
            Field::Role => &page.form.role,
        };
        if !current.trim().is_empty() {
            continue;
        }
        let value = prompt.suggest(
            &field.to_string(),
            field,
            page.lists.for_field(field),
            &mut page.suggestions,
        )?;
        page.type_into(field, &value);
        page.suggestions.clear();
    }
    if page.form.ctc.trim().is_empty() {
        page.form.ctc = prompt.text("CTC (LPA)")?;
    }

    ctx.console.loading("submission");
    settle(ctx.console, page.submit())
}
