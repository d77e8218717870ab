use job_form::{Choice, Form};

/// Department the applicant wants to join
#[derive(Choice, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    Sales,
    Marketing,
    Accounting,
    #[label("Customer service")]
    CustomerService,
}

/// Why the applicant wants the job
#[derive(Choice, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motivation {
    #[label("I want money!")]
    Money,
    #[label("I love this company")]
    Love,
    #[label("I want to learn")]
    Learn,
    #[value("noidea")]
    #[label("I don't know why")]
    NoIdea,
}

/// The job application form
#[derive(Form, Debug, Clone, PartialEq, Eq)]
#[title("Job Application Form")]
#[epilogue("Give me this job")]
pub struct JobApplication {
    #[ask("What department do you want to work for?")]
    #[required]
    pub department: Department,

    #[ask("Why do you want to join this company?")]
    #[required]
    pub motivation: Motivation,

    #[ask("Salary")]
    #[select(50, 100, 150, 200)]
    #[display("${}K")]
    pub salary: u32,

    #[ask("Introduce yourself")]
    #[required]
    pub introduce: String,

    #[ask("Tell us what is your dreams are")]
    #[multiline]
    #[required]
    #[min_len(11, "Please write more than 10 letters.")]
    pub dreams: String,

    #[ask("Email")]
    #[required]
    #[contains("@naver.com", "Only naver email is available")]
    pub email: String,
}
