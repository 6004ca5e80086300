use yew::prelude::*;
use crate::components::navbar::anchor_link;
use crate::components::notification::{use_notifications, NotificationStack};
use crate::components::reveal::use_scroll_reveal;
use crate::wizard::fields::PLAN_OPTIONS;
use crate::wizard::view::{PlanChoice, FORM_ANCHOR_ID};
use crate::wizard::WizardForm;

struct Service {
    icon: &'static str,
    title: &'static str,
    text: &'static str,
}

const SERVICES: &[Service] = &[
    Service {
        icon: "fa-file-alt",
        title: "Revisión de CV",
        text: "Analizamos tu currículum línea por línea y te devolvemos una versión clara, medible y adaptada a los filtros de selección.",
    },
    Service {
        icon: "fa-id-card",
        title: "Perfil de LinkedIn",
        text: "Optimizamos tu titular, extracto y experiencia para que los reclutadores te encuentren.",
    },
    Service {
        icon: "fa-comments",
        title: "Preparación de entrevistas",
        text: "Simulamos entrevistas reales con feedback concreto sobre tus respuestas.",
    },
];

struct Plan {
    id: &'static str,
    price: &'static str,
    features: &'static [&'static str],
    featured: bool,
}

const PLANS: &[Plan] = &[
    Plan {
        id: "basico",
        price: "29€",
        features: &["Revisión de CV", "1 ronda de correcciones", "Entrega en 5 días"],
        featured: false,
    },
    Plan {
        id: "profesional",
        price: "59€",
        features: &["CV y carta de presentación", "3 rondas de correcciones", "Perfil de LinkedIn", "Entrega en 3 días"],
        featured: true,
    },
    Plan {
        id: "premium",
        price: "99€",
        features: &["Todo lo del plan Profesional", "Simulación de entrevista", "Asesoría de 30 minutos", "Entrega en 48 horas"],
        featured: false,
    },
];

const PROCESS: &[(&str, &str)] = &[
    ("Envía tu CV", "Completa el formulario y adjunta tu currículum actual."),
    ("Análisis", "Un especialista revisa tu perfil y tus objetivos."),
    ("Mejora", "Reescribimos tu CV y te lo enviamos para revisión."),
    ("Resultado", "Recibes la versión final lista para enviar."),
];

const ADVISORY: &[(&str, &str)] = &[
    ("Cambio de sector", "Te ayudamos a reenfocar tu experiencia hacia un nuevo sector."),
    ("Primer empleo", "Convierte tus prácticas y estudios en un perfil competitivo."),
    ("Puestos directivos", "Destaca tu liderazgo e impacto con cifras."),
];

fn plan_label(id: &str) -> &'static str {
    PLAN_OPTIONS
        .iter()
        .find(|(value, _)| *value == id)
        .map(|(_, label)| *label)
        .unwrap_or("Plan")
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let (notifications, notify) = use_notifications();
    let plan_choice = use_state(|| None::<PlanChoice>);
    use_scroll_reveal();

    let choose_plan = |plan: &'static str| {
        let plan_choice = plan_choice.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            let seq = (*plan_choice).as_ref().map_or(0, |c| c.seq + 1);
            log::info!("Plan chosen from pricing card: {}", plan);
            plan_choice.set(Some(PlanChoice { seq, plan }));
        })
    };

    html! {
        <div class="landing">
            <style>
                {r#"
                    body { padding-top: 76px; }
                    section { padding: 80px 0; }
                    .hero { background: linear-gradient(135deg, #f5f8ff 0%, #ffffff 100%); }
                    .service-card, .pricing-card, .advisory-card {
                        height: 100%;
                        border-radius: 12px;
                        padding: 2rem;
                        background: #fff;
                        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.06);
                    }
                    .pricing-card.featured { border: 2px solid #0d6efd; }
                    .process-step { text-align: center; }
                    .process-step .step-circle {
                        width: 56px;
                        height: 56px;
                        margin: 0 auto 1rem;
                        border-radius: 50%;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: #0d6efd;
                        color: #fff;
                        font-weight: bold;
                    }
                    .form-step { display: none; }
                    .form-step.active { display: block; }
                    .step-indicators .step { opacity: 0.5; text-align: center; }
                    .step-indicators .step.active { opacity: 1; font-weight: bold; }
                    .step-number {
                        display: inline-flex;
                        width: 32px;
                        height: 32px;
                        border-radius: 50%;
                        align-items: center;
                        justify-content: center;
                        background: #e9ecef;
                        margin-right: 0.5rem;
                    }
                    .step.active .step-number { background: #0d6efd; color: #fff; }
                    .progress-bar { transition: width 0.4s ease; }
                    .cv-form {
                        background: #fff;
                        border-radius: 12px;
                        padding: 2rem;
                        box-shadow: 0 4px 20px rgba(0, 0, 0, 0.06);
                    }
                    @media (max-width: 768px) {
                        section { padding: 48px 0; }
                        .step-title { display: none; }
                    }
                "#}
            </style>
            <NotificationStack notifications={notifications} />

            <section id="inicio" class="hero">
                <div class="container">
                    <div class="row align-items-center">
                        <div class="col-lg-6 hero-content">
                            <h1 class="display-5 fw-bold mb-3">{"Tu CV, listo para abrir puertas"}</h1>
                            <p class="lead mb-4">
                                {"Mejoramos tu currículum para que supere los filtros de selección y llegue a quien decide."}
                            </p>
                            <a class="btn btn-primary btn-lg me-2" href="#contacto" onclick={anchor_link("#contacto")}>
                                {"Mejorar mi CV"}
                            </a>
                            <a class="btn btn-outline-primary btn-lg" href="#precios" onclick={anchor_link("#precios")}>
                                {"Ver precios"}
                            </a>
                        </div>
                        <div class="col-lg-6 hero-image text-center">
                            <img src="/assets/hero.svg" alt="Currículum mejorado" class="img-fluid" />
                        </div>
                    </div>
                </div>
            </section>

            <section id="servicios">
                <div class="container">
                    <h2 class="text-center mb-5">{"Servicios"}</h2>
                    <div class="row g-4">
                        { for SERVICES.iter().map(|service| html! {
                            <div class="col-md-4">
                                <div class="service-card">
                                    <i class={classes!("fas", service.icon, "fa-2x", "text-primary", "mb-3")}></i>
                                    <h3 class="h5">{service.title}</h3>
                                    <p class="mb-0">{service.text}</p>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section id="precios" class="bg-light">
                <div class="container">
                    <h2 class="text-center mb-5">{"Precios"}</h2>
                    <div class="row g-4">
                        { for PLANS.iter().map(|plan| html! {
                            <div class="col-md-4">
                                <div class={classes!("pricing-card", plan.featured.then(|| "featured"))}>
                                    <h3 class="h5">{plan_label(plan.id)}</h3>
                                    <p class="display-6 fw-bold">{plan.price}</p>
                                    <ul class="list-unstyled mb-4">
                                        { for plan.features.iter().map(|feature| html! {
                                            <li><i class="fas fa-check text-success me-2"></i>{*feature}</li>
                                        }) }
                                    </ul>
                                    <button class="btn btn-primary w-100" onclick={choose_plan(plan.id)}>
                                        {"Elegir plan"}
                                    </button>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section id="proceso">
                <div class="container">
                    <h2 class="text-center mb-5">{"Cómo funciona"}</h2>
                    <div class="row g-4">
                        { for PROCESS.iter().enumerate().map(|(index, (title, text))| html! {
                            <div class="col-md-3 process-step">
                                <div class="step-circle">{index + 1}</div>
                                <h3 class="h6">{*title}</h3>
                                <p class="small">{*text}</p>
                            </div>
                        }) }
                    </div>
                    <div class="row g-4 mt-4">
                        { for ADVISORY.iter().map(|(title, text)| html! {
                            <div class="col-md-4">
                                <div class="advisory-card">
                                    <h3 class="h6">{*title}</h3>
                                    <p class="mb-0 small">{*text}</p>
                                </div>
                            </div>
                        }) }
                    </div>
                </div>
            </section>

            <section id="nosotros" class="bg-light">
                <div class="container">
                    <div class="row align-items-center">
                        <div class="col-lg-6 about-image text-center">
                            <img src="/assets/about.svg" alt="Equipo de Apex" class="img-fluid" />
                        </div>
                        <div class="col-lg-6 about-content">
                            <h2 class="mb-3">{"Sobre nosotros"}</h2>
                            <p>
                                {"Somos un equipo de reclutadores y redactores que ha revisado miles de candidaturas. Sabemos qué buscan las empresas y cómo contarlo."}
                            </p>
                        </div>
                    </div>
                </div>
            </section>

            <section id={FORM_ANCHOR_ID}>
                <div class="container" style="max-width: 760px;">
                    <h2 class="text-center mb-2">{"Mejora tu CV"}</h2>
                    <p class="text-center text-muted mb-4">{"Cuatro pasos y nos ponemos manos a la obra."}</p>
                    <WizardForm on_notify={notify} plan_choice={(*plan_choice).clone()} />
                </div>
            </section>

            <footer class="py-4 bg-dark text-white text-center">
                <small>{"© Apex. Todos los derechos reservados."}</small>
            </footer>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pricing_card_maps_to_a_form_plan() {
        for plan in PLANS {
            assert!(PLAN_OPTIONS.iter().any(|(value, _)| *value == plan.id));
        }
    }

    #[test]
    fn unknown_plan_gets_generic_label() {
        assert_eq!(plan_label("premium"), "Premium");
        assert_eq!(plan_label("gold"), "Plan");
    }
}
